use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StreamError;

/// The JSON carried by one streamed frame.
///
/// Answer frames carry a `response` text delta; the final frame of a demand
/// letter carries `metadata` only. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StreamPayload {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl StreamPayload {
    /// Parse a frame payload.
    pub fn parse(frame: &str) -> Result<Self, StreamError> {
        serde_json::from_str(frame).map_err(|e| StreamError::InvalidPayload {
            message: e.to_string(),
        })
    }

    /// The text delta, if the frame carries a non-empty one.
    pub fn delta(&self) -> Option<&str> {
        self.response.as_deref().filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_frame() {
        let payload = StreamPayload::parse(r#"{"response":"Hello"}"#).unwrap();
        assert_eq!(payload.delta(), Some("Hello"));
        assert!(payload.metadata.is_none());
    }

    #[test]
    fn test_parse_metadata_frame() {
        let payload = StreamPayload::parse(r#"{"metadata":{"source":"demand-letter"}}"#).unwrap();
        assert_eq!(payload.delta(), None);
        assert_eq!(
            payload.metadata,
            Some(serde_json::json!({"source": "demand-letter"}))
        );
    }

    #[test]
    fn test_empty_response_is_not_a_delta() {
        let payload = StreamPayload::parse(r#"{"response":""}"#).unwrap();
        assert_eq!(payload.delta(), None);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = StreamPayload::parse("{\"response\": ");
        assert!(matches!(result, Err(StreamError::InvalidPayload { .. })));
    }

    #[test]
    fn test_parse_non_object_json() {
        assert!(StreamPayload::parse("[1,2]").is_err());
    }
}
