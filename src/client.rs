//! Backend API client.
//!
//! Wraps every document-QA endpoint. The two answer endpoints stream their
//! body and are returned as a [`FrameStream`]; everything else is a single
//! JSON response.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::error::{error_payload, ApiError, ApiResult};
use crate::ingest::UploadFile;
use crate::models::{
    ClearDocsResponse, DeleteDocResponse, DemandProcessResponse, DemandUploadResponse,
    ListDocsResponse, ProcessResponse, QueryRequest, UploadResponse, UrlRequest,
};
use crate::sse::{decode_frames, FrameDecoder};
use crate::traits::{ByteStream, Headers, HttpClient, MultipartForm, Response};

/// Frames decoded from a streamed answer.
pub type FrameStream = FrameDecoder<ByteStream>;

/// Client for the document-QA backend.
pub struct ApiClient<C: HttpClient = ReqwestHttpClient> {
    config: ClientConfig,
    http: C,
}

impl ApiClient<ReqwestHttpClient> {
    /// Create a client using reqwest with the given configuration.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = ReqwestHttpClient::from_config(&config)?;
        Ok(Self { config, http })
    }

    /// Create a client for a base URL with default settings.
    pub fn with_url(base_url: &str) -> ApiResult<Self> {
        Self::new(ClientConfig::new().with_base_url(base_url))
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// Create a client over any [`HttpClient`] implementation.
    pub fn with_http_client(config: ClientConfig, http: C) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Ask a question; the answer arrives as `{"response": ...}` frames.
    pub async fn query(&self, request: &QueryRequest) -> ApiResult<FrameStream> {
        self.stream("query/", request).await
    }

    /// Generate a demand letter from the uploaded demand documents.
    ///
    /// The letter arrives as `{"response": ...}` frames followed by a
    /// `{"metadata": ...}` frame.
    pub async fn generate_demand_letter(&self, request: &QueryRequest) -> ApiResult<FrameStream> {
        self.stream("generate-demand-letter/", request).await
    }

    /// Upload a PDF for question answering.
    pub async fn upload_pdf(&self, file: UploadFile) -> ApiResult<UploadResponse> {
        let form = MultipartForm::new().file(
            "file",
            file.filename,
            file.content_type,
            file.bytes,
        );
        let response = self
            .http
            .post_form(&self.config.endpoint("upload-pdf/"), form, &Headers::new())
            .await?;
        parse_response(response)
    }

    /// Ask the backend to download a PDF from a URL.
    pub async fn upload_pdf_url(&self, file_url: &str) -> ApiResult<UploadResponse> {
        let form = MultipartForm::new().text("file_url", file_url);
        let response = self
            .http
            .post_form(
                &self.config.endpoint("upload-pdf-from-url/"),
                form,
                &Headers::new(),
            )
            .await?;
        parse_response(response)
    }

    /// Index every uploaded PDF.
    pub async fn process_documents(&self) -> ApiResult<ProcessResponse> {
        self.post_empty("process/").await
    }

    /// Scrape and index an HTML page.
    pub async fn process_html(&self, url: &str) -> ApiResult<ProcessResponse> {
        let request = UrlRequest {
            url: url.to_string(),
        };
        let response = self
            .http
            .post(
                &self.config.endpoint("process-html/"),
                &serde_json::to_string(&request)?,
                &json_headers(),
            )
            .await?;
        parse_response(response)
    }

    /// Upload supporting documents for a demand letter.
    pub async fn upload_demand_docs(&self, files: Vec<UploadFile>) -> ApiResult<DemandUploadResponse> {
        let form = files.into_iter().fold(MultipartForm::new(), |form, file| {
            form.file("files", file.filename, file.content_type, file.bytes)
        });
        let response = self
            .http
            .post_form(
                &self.config.endpoint("upload-demand-docs/"),
                form,
                &Headers::new(),
            )
            .await?;
        parse_response(response)
    }

    /// Index the uploaded demand documents.
    pub async fn process_demand_docs(&self) -> ApiResult<DemandProcessResponse> {
        self.post_empty("process-demand-docs/").await
    }

    /// Remove every uploaded demand document.
    pub async fn clear_demand_docs(&self) -> ApiResult<ClearDocsResponse> {
        let response = self
            .http
            .delete(&self.config.endpoint("clear-demand-docs/"), &Headers::new())
            .await?;
        parse_response(response)
    }

    pub async fn list_demand_docs(&self) -> ApiResult<ListDocsResponse> {
        let response = self
            .http
            .get(&self.config.endpoint("list-demand-docs/"), &Headers::new())
            .await?;
        parse_response(response)
    }

    /// Remove one demand document by name.
    pub async fn delete_demand_doc(&self, filename: &str) -> ApiResult<DeleteDocResponse> {
        let url = format!(
            "{}?filename={}",
            self.config.endpoint("delete-demand-doc/"),
            urlencoding::encode(filename)
        );
        let response = self.http.delete(&url, &Headers::new()).await?;
        parse_response(response)
    }

    /// Check whether the backend answers on its base URL.
    ///
    /// Returns `Ok(false)` for a non-2xx answer and an error only when the
    /// server could not be reached.
    pub async fn health_check(&self) -> ApiResult<bool> {
        let response = self.http.get(&self.config.base_url, &Headers::new()).await?;
        Ok(response.is_success())
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .http
            .post(&self.config.endpoint(path), "", &Headers::new())
            .await?;
        parse_response(response)
    }

    async fn stream<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<FrameStream> {
        let url = self.config.endpoint(path);
        let mut headers = json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        let transport = self
            .http
            .post_stream(&url, &serde_json::to_string(body)?, &headers)
            .await?;

        info!(url = %url, "Answer stream opened");
        Ok(decode_frames(transport))
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

/// Deserialize a 2xx body, or turn any other status into [`ApiError::Status`].
fn parse_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    if !response.is_success() {
        debug!(status = response.status, "Request rejected by server");
        return Err(ApiError::Status {
            status: response.status,
            payload: error_payload(&response.body),
        });
    }
    Ok(response.json()?)
}
