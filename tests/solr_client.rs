//! SolrClient against a mock Solr update handler

use serde_json::json;
use solrload::tasks::Task;
use solrload::upload::{Credentials, FailureKind, SolrClient, UploadConfig, UploadError, Uploader};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_string, header, method, path, query_param},
};

fn solr_ok() -> serde_json::Value {
    json!({ "responseHeader": { "status": 0, "QTime": 12 } })
}

fn config(server: &MockServer, commit: bool) -> UploadConfig {
    UploadConfig {
        collection: format!("{}/solr/books", server.uri()).parse().unwrap(),
        credentials: None,
        commit,
        timeout: Duration::from_secs(5),
    }
}

fn write_task(dir: &TempDir, name: &str, content: &str) -> Task {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    Task::new(path)
}

#[tokio::test]
async fn test_upload_posts_file_to_update_handler() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let body = r#"[{"id":"1","title":"Dune"}]"#;
    let task = write_task(&dir, "books.json", body);

    Mock::given(method("POST"))
        .and(path("/solr/books/update"))
        .and(query_param("commit", "true"))
        .and(query_param("wt", "json"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_string(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(solr_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, true)).unwrap();
    client.upload(&task).await.unwrap();
}

#[tokio::test]
async fn test_upload_sends_user_agent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", "[]");

    Mock::given(method("POST"))
        .and(header("user-agent", solrload::upload::user_agent().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(solr_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, true)).unwrap();
    client.upload(&task).await.unwrap();
}

#[tokio::test]
async fn test_nocommit_omits_commit_param() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", "[]");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(solr_ok()))
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, false)).unwrap();
    client.upload(&task).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "commit"));
}

#[tokio::test]
async fn test_upload_uses_basic_auth() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", "[]");

    Mock::given(method("POST"))
        .and(basic_auth("indexer", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(solr_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config(&server, true);
    config.credentials = Some(Credentials {
        user: "indexer".to_string(),
        password: Some("s3cret".to_string()),
    });

    let client = SolrClient::new(&config).unwrap();
    client.upload(&task).await.unwrap();
}

#[tokio::test]
async fn test_solr_error_message_is_reported() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", r#"[{"title":"no id"}]"#);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "responseHeader": { "status": 400, "QTime": 1 },
            "error": { "msg": "Document is missing mandatory uniqueKey field: id", "code": 400 }
        })))
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, true)).unwrap();
    let err = client.upload(&task).await.unwrap_err();

    match &err {
        UploadError::Rejected { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Document is missing mandatory uniqueKey field: id");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(err.kind(), FailureKind::Remote);
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_reason() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", "[]");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>Unauthorized</html>"))
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, true)).unwrap();
    let err = client.upload(&task).await.unwrap_err();

    assert!(matches!(
        err,
        UploadError::Rejected { status: 401, ref message } if message == "Unauthorized"
    ));
}

#[tokio::test]
async fn test_nonzero_solr_status_is_rejected() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", "[]");

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "responseHeader": { "status": 500, "QTime": 0 } })),
        )
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, true)).unwrap();
    let err = client.upload(&task).await.unwrap_err();
    assert!(matches!(err, UploadError::Rejected { status: 200, .. }));
}

#[tokio::test]
async fn test_missing_file_is_local_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = Task::new(dir.path().join("vanished.json"));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(solr_ok()))
        .expect(0)
        .mount(&server)
        .await;

    let client = SolrClient::new(&config(&server, true)).unwrap();
    let err = client.upload(&task).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Local);
    assert!(err.to_string().contains("vanished.json"));
}

#[tokio::test]
async fn test_slow_solr_times_out() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let task = write_task(&dir, "a.json", "[]");

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(solr_ok())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = config(&server, true);
    config.timeout = Duration::from_millis(300);

    let client = SolrClient::new(&config).unwrap();
    let err = client.upload(&task).await.unwrap_err();
    assert!(matches!(err, UploadError::Timeout), "got {err:?}");
}
