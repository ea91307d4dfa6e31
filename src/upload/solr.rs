//! Solr update client

use super::{Credentials, UploadConfig, UploadError, Uploader};
use crate::tasks::Task;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

/// `solrload/<version> (<os>)`
pub fn user_agent() -> String {
    format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}

/// Body of a Solr update response; only the fields needed for error reporting
#[derive(Debug, Deserialize)]
struct UpdateResponse {
    #[serde(rename = "responseHeader")]
    response_header: Option<ResponseHeader>,
    error: Option<SolrError>,
}

#[derive(Debug, Deserialize)]
struct ResponseHeader {
    status: i64,
    #[serde(rename = "QTime")]
    qtime: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SolrError {
    msg: Option<String>,
}

/// Posts JSON documents to `<collection>/update`
///
/// Built once per run; the inner `reqwest::Client` pools connections across
/// all workers.
pub struct SolrClient {
    client: Client,
    update_url: Url,
    credentials: Option<Credentials>,
    params: Vec<(&'static str, &'static str)>,
}

impl SolrClient {
    pub fn new(config: &UploadConfig) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()
            .map_err(|e| UploadError::Request(e.to_string()))?;

        let update_url = update_url(&config.collection)?;

        let mut params = vec![("wt", "json")];
        if config.commit {
            params.push(("commit", "true"));
        }

        Ok(Self {
            client,
            update_url,
            credentials: config.credentials.clone(),
            params,
        })
    }

    pub fn update_url(&self) -> &Url {
        &self.update_url
    }
}

fn update_url(collection: &Url) -> Result<Url, UploadError> {
    let mut url = collection.clone();
    url.path_segments_mut()
        .map_err(|_| UploadError::Request(format!("not a base url: {collection}")))?
        .pop_if_empty()
        .push("update");
    Ok(url)
}

#[async_trait]
impl Uploader for SolrClient {
    async fn upload(&self, task: &Task) -> Result<(), UploadError> {
        let body = tokio::fs::read(task.path())
            .await
            .map_err(|source| UploadError::Read {
                path: task.path().to_path_buf(),
                source,
            })?;

        debug!(task = %task, size = body.len(), "Sending update query");

        let mut request = self
            .client
            .post(self.update_url.clone())
            .query(&self.params)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.user, credentials.password.as_ref());
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice::<UpdateResponse>(&bytes).ok();

        if !status.is_success() {
            let message = parsed
                .and_then(|r| r.error)
                .and_then(|e| e.msg)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        match parsed.and_then(|r| r.response_header) {
            Some(header) if header.status != 0 => Err(UploadError::Rejected {
                status: status.as_u16(),
                message: format!("solr status {}", header.status),
            }),
            Some(header) => {
                debug!(task = %task, qtime = ?header.qtime, "Update query accepted");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(link: &str, commit: bool) -> UploadConfig {
        UploadConfig {
            collection: Url::parse(link).unwrap(),
            credentials: None,
            commit,
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_update_url() {
        let client = SolrClient::new(&config("http://localhost:8983/solr/books", true)).unwrap();
        assert_eq!(
            client.update_url().as_str(),
            "http://localhost:8983/solr/books/update"
        );

        let client = SolrClient::new(&config("http://localhost:8983/solr/books/", true)).unwrap();
        assert_eq!(
            client.update_url().as_str(),
            "http://localhost:8983/solr/books/update"
        );
    }

    #[test]
    fn test_commit_param() {
        let client = SolrClient::new(&config("http://localhost:8983/solr/books", true)).unwrap();
        assert!(client.params.contains(&("commit", "true")));

        let client = SolrClient::new(&config("http://localhost:8983/solr/books", false)).unwrap();
        assert!(!client.params.iter().any(|(k, _)| *k == "commit"));
    }

    #[test]
    fn test_user_agent() {
        let agent = user_agent();
        assert!(agent.starts_with("solrload/0.1.0 ("));
        assert!(agent.ends_with(')'));
    }

    #[test]
    fn test_parse_solr_error_body() {
        let body = br#"{"responseHeader":{"status":400,"QTime":3},"error":{"msg":"Document is missing mandatory uniqueKey field: id","code":400}}"#;
        let parsed: UpdateResponse = serde_json::from_slice(body).unwrap();
        assert_eq!(parsed.response_header.unwrap().status, 400);
        assert_eq!(
            parsed.error.unwrap().msg.as_deref(),
            Some("Document is missing mandatory uniqueKey field: id")
        );
    }
}
