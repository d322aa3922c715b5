use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response to a PDF upload (file or URL)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub filename: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Response to the document and HTML processing endpoints.
///
/// The backend answers either `{"message": ...}` or, when nothing could be
/// extracted, `{"error": ...}` with a 200 status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProcessResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProcessResponse {
    /// Text suitable for showing to the user.
    pub fn summary(&self) -> &str {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("Processing finished.")
    }
}

/// Response to a demand-document upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemandUploadResponse {
    pub uploaded: Vec<String>,
}

/// Response to demand-document processing.
///
/// Only the common fields are typed; anything else the backend reports is
/// kept in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DemandProcessResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub documents_loaded: Option<u64>,
    #[serde(default)]
    pub chunks_indexed: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One file that could not be removed while clearing demand documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearDocError {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearDocsResponse {
    pub deleted: Vec<String>,
    #[serde(default)]
    pub errors: Vec<ClearDocError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListDocsResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteDocResponse {
    pub deleted: String,
}
