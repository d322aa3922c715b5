//! ApiClient endpoint tests using wiremock.
//!
//! These run the reqwest-backed client against a local mock server.

use docqa::chat::{consume_stream, Conversation};
use docqa::client::ApiClient;
use docqa::error::{ApiError, ErrorCategory};
use docqa::ingest::UploadFile;
use docqa::models::QueryRequest;
use bytes::Bytes;
use futures::StreamExt;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream")
}

#[tokio::test]
async fn test_query_streams_answer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query/"))
        .and(header("Accept", "text/event-stream"))
        .and(body_json(serde_json::json!({"query": "Who is the claimant?", "top_k": 3})))
        .respond_with(sse(
            "data: {\"response\":\"Jane\"}\n\ndata: {\"response\":\" Doe\"}\n\n",
        ))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let mut conversation = Conversation::new();
    let query = conversation.submit("Who is the claimant?").unwrap();

    let frames = client.query(&QueryRequest::new(query)).await.unwrap();
    let summary = consume_stream(frames, &mut conversation, |_| {})
        .await
        .unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(conversation.messages()[1].content, "Jane Doe");
}

#[tokio::test]
async fn test_query_error_status_carries_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/query/"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"detail": "FAISS index not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let err = client.query(&QueryRequest::new("x")).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.detail().as_deref(), Some("FAISS index not found"));
}

#[tokio::test]
async fn test_demand_letter_frames_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-demand-letter/"))
        .and(body_json(serde_json::json!({"query": "q", "top_k": 5})))
        .respond_with(sse(concat!(
            "data: {\"response\": \"Dear \"}\n\n",
            "data: {\"response\": \"Sir\"}\n\n",
            "data: {\"metadata\": {\"source\": \"demand-letter\"}}\n\n",
        )))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let frames: Vec<_> = client
        .generate_demand_letter(&QueryRequest::demand_letter())
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(frames.len(), 3);
    assert!(frames[2].as_ref().unwrap().contains("metadata"));
}

#[tokio::test]
async fn test_upload_pdf_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload-pdf/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"filename": "aclaim.pdf", "status": "uploaded"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let file = UploadFile::new("aclaim.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.4"));
    let response = client.upload_pdf(file).await.unwrap();

    assert_eq!(response.filename, "aclaim.pdf");
    assert_eq!(response.status.as_deref(), Some("uploaded"));

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"aclaim.pdf\""));
}

#[tokio::test]
async fn test_upload_pdf_url_sends_form_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload-pdf-from-url/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"filename": "a.pdf"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let response = client
        .upload_pdf_url("https://example.com/a.pdf")
        .await
        .unwrap();
    assert_eq!(response.filename, "a.pdf");

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file_url\""));
    assert!(body.contains("https://example.com/a.pdf"));
}

#[tokio::test]
async fn test_process_html_posts_url_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process-html/"))
        .and(body_json(serde_json::json!({"url": "https://example.com/page"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "HTML processed"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let response = client.process_html("https://example.com/page").await.unwrap();
    assert_eq!(response.summary(), "HTML processed");
}

#[tokio::test]
async fn test_process_documents_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": "No valid documents extracted"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let response = client.process_documents().await.unwrap();
    assert_eq!(response.summary(), "No valid documents extracted");
}

#[tokio::test]
async fn test_demand_docs_lifecycle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload-demand-docs/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"uploaded": ["police.pdf", "bills.txt"]})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/process-demand-docs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "documents_loaded": 2,
            "chunks_indexed": 17
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/list-demand-docs/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"files": ["police.pdf", "bills.txt"]})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete-demand-doc/"))
        .and(query_param("filename", "bills.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"deleted": "bills.txt"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/clear-demand-docs/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deleted": ["police.pdf"],
            "errors": [{"file": "locked.pdf", "error": "permission denied"}]
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();

    let uploaded = client
        .upload_demand_docs(vec![
            UploadFile::new("police.pdf", "application/pdf", Bytes::from_static(b"%PDF")),
            UploadFile::new("bills.txt", "text/plain", Bytes::from_static(b"$1,200")),
        ])
        .await
        .unwrap();
    assert_eq!(uploaded.uploaded, vec!["police.pdf", "bills.txt"]);

    let processed = client.process_demand_docs().await.unwrap();
    assert_eq!(processed.documents_loaded, Some(2));
    assert_eq!(processed.chunks_indexed, Some(17));

    let listed = client.list_demand_docs().await.unwrap();
    assert_eq!(listed.files.len(), 2);

    let deleted = client.delete_demand_doc("bills.txt").await.unwrap();
    assert_eq!(deleted.deleted, "bills.txt");

    let cleared = client.clear_demand_docs().await.unwrap();
    assert_eq!(cleared.deleted, vec!["police.pdf"]);
    assert_eq!(cleared.errors[0].file, "locked.pdf");
}

#[tokio::test]
async fn test_delete_missing_doc_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/delete-demand-doc/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "File not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let err = client.delete_demand_doc("nope.pdf").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert_eq!(err.to_string(), "Server error (404): File not found");
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "ok"})))
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
async fn test_requests_carry_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/list-demand-docs/"))
        .and(header(
            "user-agent",
            format!("docqa/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"files": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::with_url(&mock_server.uri()).unwrap();
    let listed = client.list_demand_docs().await.unwrap();
    assert!(listed.files.is_empty());
}

#[tokio::test]
async fn test_health_check_unreachable() {
    let client = ApiClient::with_url("http://127.0.0.1:59999").unwrap();
    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
    assert_eq!(err.category(), ErrorCategory::Network);
}
