//! Configuration management for solrload
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (`SOLRLOAD__<KEY>`, plus `.env` via dotenvy)
//! 4. Command line flags
//!
//! # Usage
//!
//! ```no_run
//! use solrload::config::{Overrides, Settings};
//!
//! let settings = Settings::load(None, Overrides::default()).expect("invalid configuration");
//! let upload = settings.upload_config().expect("invalid collection link");
//! println!("Uploading to {}", upload.collection);
//! ```
//!
//! # Credentials
//!
//! The basic auth user and password are never read from the file. They come
//! from `--user`/`--password`, or from `SOLRUSER`/`SOLRPASSW` when the flags
//! are absent.
//!
//! # Configuration File
//!
//! By default `solrload.toml` in the working directory is read if present.
//! This can be overridden with `--config` or the `SOLRLOAD_CONFIG` environment
//! variable.

mod models;
mod sources;
mod validation;

pub use models::{Overrides, Settings};
pub use sources::{PASSWORD_ENV, USER_ENV, load_secrets};
pub use validation::ValidationError;

use crate::upload::{Credentials, UploadConfig};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid collection url: {0}")]
    InvalidUrl(String),
}

impl Settings {
    /// Load settings from all sources and validate them
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (bad collection link, zero workers, etc.)
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut settings = sources::load(path)?;
        settings.apply(overrides);
        validation::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a specific file without reading credentials from
    /// the environment
    pub fn load_from_path(path: std::path::PathBuf, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut settings = sources::load_from_sources(path)?;
        settings.apply(overrides);
        validation::validate(&settings)?;
        Ok(settings)
    }

    /// Build the upload configuration shared by every worker
    pub fn upload_config(&self) -> Result<UploadConfig, ConfigError> {
        let link = self
            .collection
            .as_deref()
            .ok_or(ValidationError::MissingCollection)?;
        let collection = reqwest::Url::parse(link.trim_end_matches('/'))
            .map_err(|e| ConfigError::InvalidUrl(format!("{link}: {e}")))?;

        let credentials = self.user.as_ref().map(|user| Credentials {
            user: user.clone(),
            password: self.password.clone(),
        });

        Ok(UploadConfig {
            collection,
            credentials,
            commit: self.commit,
            timeout: Duration::from_secs(self.http_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("solrload.toml");

        fs::write(&config_path, "collection = \"http://localhost:8983/solr/books\"\n").unwrap();

        let settings = Settings::load_from_path(config_path, Overrides::default()).unwrap();
        assert_eq!(settings.nqueries, 8);

        let upload = settings.upload_config().unwrap();
        assert_eq!(upload.collection.as_str(), "http://localhost:8983/solr/books");
        assert!(upload.commit);
        assert_eq!(upload.timeout, Duration::from_secs(180));
        assert!(upload.credentials.is_none());
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("solrload.toml");

        fs::write(
            &config_path,
            "collection = \"http://localhost:8983/solr/books\"\nnqueries = 4\n",
        )
        .unwrap();

        let overrides = Overrides {
            collection: Some("https://solr.prod:8984/solr/articles/".to_string()),
            nqueries: Some(16),
            no_commit: true,
            user: Some("loader".to_string()),
            password: Some("pw".to_string()),
            http_timeout_secs: Some(5),
            src_dir: Some(PathBuf::from("dumps")),
        };

        let settings = Settings::load_from_path(config_path, overrides).unwrap();
        assert_eq!(settings.nqueries, 16);
        assert_eq!(settings.src_dir, PathBuf::from("dumps"));

        let upload = settings.upload_config().unwrap();
        assert_eq!(upload.collection.as_str(), "https://solr.prod:8984/solr/articles");
        assert!(!upload.commit);
        assert_eq!(upload.timeout, Duration::from_secs(5));
        let credentials = upload.credentials.unwrap();
        assert_eq!(credentials.user, "loader");
        assert_eq!(credentials.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_validation_catches_bad_link() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("solrload.toml");

        fs::write(&config_path, "collection = \"http://localhost:8983/books\"\n").unwrap();

        let result = Settings::load_from_path(config_path, Overrides::default());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::Validation(ValidationError::InvalidCollectionLink(_))
        ));
    }

    #[test]
    fn test_out_of_range_port_is_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("solrload.toml");

        fs::write(&config_path, "collection = \"http://localhost:99999/solr/books\"\n").unwrap();

        let settings = Settings::load_from_path(config_path, Overrides::default()).unwrap();
        assert!(matches!(
            settings.upload_config().unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }
}
