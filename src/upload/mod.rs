//! Upload operation
//!
//! One call to [`Uploader::upload`] sends one task to the indexing service.
//! Implementations must be safe to call from many workers at once with the
//! same shared configuration.

mod error;
mod solr;

pub use error::{FailureKind, UploadError};
pub use solr::{SolrClient, user_agent};

use crate::tasks::Task;
use async_trait::async_trait;
use std::time::Duration;

/// Basic auth credentials
#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Settings shared read-only by every worker for the whole run
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Collection link without trailing slash
    pub collection: reqwest::Url,
    pub credentials: Option<Credentials>,
    /// Request a commit with every update query
    pub commit: bool,
    /// Bound on one update query, connect to last byte
    pub timeout: Duration,
}

/// Sends one task to the remote index
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload a single task. One call is one attempt; there are no retries.
    async fn upload(&self, task: &Task) -> Result<(), UploadError>;
}

