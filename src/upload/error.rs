use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("update query timed out")]
    Timeout,

    #[error("update query failed: {0}")]
    Request(String),

    #[error("solr rejected the update (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("upload panicked: {0}")]
    Panicked(String),
}

/// Where a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The task's file could not be read, or the upload code itself broke
    Local,
    /// Transport error or rejection by the index
    Remote,
}

impl UploadError {
    pub fn kind(&self) -> FailureKind {
        match self {
            UploadError::Read { .. } | UploadError::Panicked(_) => FailureKind::Local,
            UploadError::Timeout | UploadError::Request(_) | UploadError::Rejected { .. } => {
                FailureKind::Remote
            }
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UploadError::Timeout
        } else {
            UploadError::Request(e.to_string())
        }
    }
}
