//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, multipart, DELETE, streaming)

pub mod http;

pub use http::{ByteStream, FormPart, Headers, HttpClient, HttpError, MultipartForm, Response};
