use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level settings, before validation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Link to a Solr collection, e.g. `http://localhost:8983/solr/books`
    #[serde(default)]
    pub collection: Option<String>,
    /// Directory with the JSON dumps to upload
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,
    /// Number of update queries in flight at once
    #[serde(default = "default_nqueries")]
    pub nqueries: usize,
    /// Ask Solr to commit after each update query
    #[serde(default = "default_commit")]
    pub commit: bool,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Basic auth user (loaded from environment or CLI, not from config file)
    #[serde(skip)]
    pub user: Option<String>,
    /// Basic auth password (loaded from environment or CLI, not from config file)
    #[serde(skip)]
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            collection: None,
            src_dir: default_src_dir(),
            nqueries: default_nqueries(),
            commit: default_commit(),
            http_timeout_secs: default_http_timeout_secs(),
            user: None,
            password: None,
        }
    }
}

fn default_src_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_nqueries() -> usize {
    8
}

fn default_commit() -> bool {
    true
}

fn default_http_timeout_secs() -> u64 {
    180
}

/// Values given on the command line; `None` leaves the layered value alone
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub collection: Option<String>,
    pub src_dir: Option<PathBuf>,
    pub nqueries: Option<usize>,
    pub no_commit: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub http_timeout_secs: Option<u64>,
}

impl Settings {
    /// Apply command line values on top of file and environment layers
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(collection) = overrides.collection {
            self.collection = Some(collection);
        }
        if let Some(src_dir) = overrides.src_dir {
            self.src_dir = src_dir;
        }
        if let Some(nqueries) = overrides.nqueries {
            self.nqueries = nqueries;
        }
        if overrides.no_commit {
            self.commit = false;
        }
        if let Some(secs) = overrides.http_timeout_secs {
            self.http_timeout_secs = secs;
        }
        // Empty strings count as unset, matching an unset environment variable
        if let Some(user) = overrides.user.filter(|u| !u.is_empty()) {
            self.user = Some(user);
        }
        if let Some(password) = overrides.password.filter(|p| !p.is_empty()) {
            self.password = Some(password);
        }
    }
}
