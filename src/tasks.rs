//! Task source: the JSON dumps found in the source directory

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot read source directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// One document dump to upload
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task(PathBuf);

impl Task {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Collect `dir/*.json`, sorted by file name. Subdirectories are not visited.
pub fn discover(dir: &Path) -> Result<Vec<Task>, DiscoveryError> {
    let mut tasks = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| DiscoveryError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        let is_json = entry.file_name().as_encoded_bytes().ends_with(b".json");
        // Symlinks are kept; a dangling one fails later as an unreadable task
        let file_type = entry.file_type();
        if is_json && (file_type.is_file() || file_type.is_symlink()) {
            tasks.push(Task::new(entry.into_path()));
        }
    }

    debug!(dir = %dir.display(), found = tasks.len(), "Discovered JSON files");
    Ok(tasks)
}
