use super::models::Settings;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `http[s]://host[:port]/solr/<collection>[/]`
static COLLECTION_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://([A-Za-z0-9.-]+:\d+|[A-Za-z0-9.-]+)/solr/[._A-Za-z0-9-]+/?$")
        .expect("collection link pattern is valid")
});

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no link to a Solr collection given (use --collink)")]
    MissingCollection,

    #[error("wrong http link to a solr collection \"{0}\"")]
    InvalidCollectionLink(String),

    #[error("number of parallel queries must be at least 1")]
    ZeroQueries,

    #[error("http timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("a password was given without a user name")]
    PasswordWithoutUser,
}

/// Validate the merged settings
pub fn validate(settings: &Settings) -> Result<(), ValidationError> {
    validate_collection(settings.collection.as_deref())?;

    if settings.nqueries == 0 {
        return Err(ValidationError::ZeroQueries);
    }

    if settings.http_timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout);
    }

    if settings.password.is_some() && settings.user.is_none() {
        return Err(ValidationError::PasswordWithoutUser);
    }

    Ok(())
}

fn validate_collection(link: Option<&str>) -> Result<(), ValidationError> {
    let link = link.ok_or(ValidationError::MissingCollection)?;
    if !COLLECTION_LINK.is_match(link) {
        return Err(ValidationError::InvalidCollectionLink(link.to_string()));
    }
    Ok(())
}
