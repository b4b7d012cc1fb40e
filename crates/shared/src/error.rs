use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Internal,
}

/// JSON error body a backend may return with a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Best-effort extraction of a human readable message from a response body:
    /// an `ApiError` JSON body, a `{"message": ..}` / `{"error": ..}` object, or
    /// the trimmed raw text.
    pub fn message_from_body(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(api_error) = serde_json::from_str::<ApiError>(trimmed) {
            return Some(api_error.message);
        }
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str(trimmed) {
            for key in ["message", "error"] {
                if let Some(serde_json::Value::String(text)) = map.get(key) {
                    return Some(text.clone());
                }
            }
        }
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_messages_from_common_bodies() {
        let body = serde_json::to_string(&ApiError::new(ErrorCode::NotFound, "no such employee"))
            .expect("json");
        assert_eq!(
            ApiError::message_from_body(&body).as_deref(),
            Some("no such employee")
        );
        assert_eq!(
            ApiError::message_from_body(r#"{"error":"boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(
            ApiError::message_from_body("  Internal Server Error \n").as_deref(),
            Some("Internal Server Error")
        );
        assert_eq!(ApiError::message_from_body("   "), None);
    }
}
