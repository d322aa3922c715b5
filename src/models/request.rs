use serde::{Deserialize, Serialize};

/// Default number of chunks retrieved for a question
pub const DEFAULT_QUERY_TOP_K: u32 = 3;
/// Default number of chunks retrieved for a demand letter
pub const DEFAULT_LETTER_TOP_K: u32 = 5;
/// Query sent for a demand letter when the user gives none
pub const DEFAULT_LETTER_QUERY: &str = "q";

/// Request body for the query and demand-letter endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The natural-language question
    pub query: String,
    /// Number of document chunks to retrieve
    pub top_k: u32,
}

impl QueryRequest {
    /// A question with the default retrieval depth
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: DEFAULT_QUERY_TOP_K,
        }
    }

    /// The default demand-letter request
    pub fn demand_letter() -> Self {
        Self {
            query: DEFAULT_LETTER_QUERY.to_string(),
            top_k: DEFAULT_LETTER_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

/// Request body for processing an HTML page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlRequest {
    pub url: String,
}
