use super::models::Settings;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "SOLRLOAD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "solrload.toml";
const ENV_PREFIX: &str = "SOLRLOAD";
const ENV_SEPARATOR: &str = "__";

pub const USER_ENV: &str = "SOLRUSER";
pub const PASSWORD_ENV: &str = "SOLRPASSW";

/// Load settings from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
    };

    let mut settings = load_from_sources(config_path)?;
    load_secrets(&mut settings);

    Ok(settings)
}

/// Credentials are never stored in TOML files, only in environment
pub fn load_secrets(settings: &mut Settings) {
    if let Ok(user) = env::var(USER_ENV) {
        if !user.is_empty() {
            settings.user = Some(user);
        }
    }
    if let Ok(password) = env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            settings.password = Some(password);
        }
    }
}

/// Load settings from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "Loading configuration file");
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            path = %config_path.display(),
            "Configuration file not found, using defaults and environment overrides"
        );
    }

    // SOLRLOAD__NQUERIES -> nqueries
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
