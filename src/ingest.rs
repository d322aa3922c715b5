//! Local checks and preparation for document uploads.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::Url;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Extensions accepted for demand-letter supporting documents
pub const DEMAND_DOC_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "png", "jpg", "jpeg"];

/// Errors raised before an upload is sent.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Not a PDF file: {}", .0.display())]
    NotPdf(PathBuf),

    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedType(PathBuf),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("URL must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            IngestError::NotPdf(_) => "E_INGEST_NOT_PDF",
            IngestError::UnsupportedType(_) => "E_INGEST_TYPE",
            IngestError::InvalidUrl(_) | IngestError::UnsupportedScheme(_) => "E_INGEST_URL",
            IngestError::Read { .. } => "E_INGEST_READ",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            IngestError::Read { .. } => ErrorCategory::System,
            _ => ErrorCategory::User,
        }
    }
}

/// A file ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk. The upload name is the sanitised file name and
    /// the content type is guessed from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, IngestError> {
        let data = tokio::fs::read(path).await.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(
            sanitize_filename(&name),
            content_type_for(path),
            Bytes::from(data),
        ))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Make a file name safe for the backend's storage.
///
/// Whitespace is removed, only `[A-Za-z0-9_.-]` is kept, and an `a` is
/// prepended unless the name starts with a lowercase ASCII letter.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    if cleaned.starts_with(|c: char| c.is_ascii_lowercase()) {
        cleaned
    } else {
        format!("a{}", cleaned)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Accept only `.pdf` files (case-insensitive).
pub fn validate_pdf(path: &Path) -> Result<(), IngestError> {
    match extension_of(path).as_deref() {
        Some("pdf") => Ok(()),
        _ => Err(IngestError::NotPdf(path.to_path_buf())),
    }
}

/// Accept the document types the demand-letter backend can index.
pub fn validate_demand_doc(path: &Path) -> Result<(), IngestError> {
    match extension_of(path) {
        Some(ext) if DEMAND_DOC_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(IngestError::UnsupportedType(path.to_path_buf())),
    }
}

/// Parse a user-supplied URL, accepting only http and https.
pub fn validate_url(input: &str) -> Result<Url, IngestError> {
    let url = Url::parse(input.trim()).map_err(|_| IngestError::InvalidUrl(input.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(IngestError::UnsupportedScheme(input.to_string())),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match extension_of(path).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Human-readable size: `"512 Bytes"`, `"1.50 KB"`, `"2.00 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    if bytes < 1024 {
        return format!("{} Bytes", bytes);
    }
    let kb = bytes as f64 / KB;
    if kb < KB {
        return format!("{:.2} KB", kb);
    }
    format!("{:.2} MB", kb / KB)
}
