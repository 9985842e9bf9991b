//! Result type alias for chatline operations.

use super::chat_error::ChatError;

/// Type alias for Results using [`ChatError`].
pub type ChatResult<T> = Result<T, ChatError>;

/// Extension trait that tags an error with the endpoint it came from.
pub trait ResultExt<T> {
    /// Turn a deserialization failure into [`ChatError::InvalidResponse`].
    fn invalid_response(self, endpoint: &str) -> ChatResult<T>;
}

impl<T> ResultExt<T> for Result<T, serde_json::Error> {
    fn invalid_response(self, endpoint: &str) -> ChatResult<T> {
        self.map_err(|e| ChatError::InvalidResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_response_tags_endpoint() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err = result.invalid_response("/chat/conversations").unwrap_err();
        match err {
            ChatError::InvalidResponse { endpoint, .. } => {
                assert_eq!(endpoint, "/chat/conversations")
            }
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u32, serde_json::Error> = Ok(7);
        assert_eq!(result.invalid_response("x").unwrap(), 7);
    }
}
