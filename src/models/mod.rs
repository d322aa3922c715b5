mod message;
mod payload;
mod request;
mod response;

pub use message::{Message, MessageRole};
pub use payload::StreamPayload;
pub use request::{
    QueryRequest, UrlRequest, DEFAULT_LETTER_QUERY, DEFAULT_LETTER_TOP_K, DEFAULT_QUERY_TOP_K,
};
pub use response::{
    ClearDocError, ClearDocsResponse, DeleteDocResponse, DemandProcessResponse,
    DemandUploadResponse, ListDocsResponse, ProcessResponse, UploadResponse,
};
