use serde::{Deserialize, Serialize};

/// Request payload for the ask endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AskRequest {
    pub question: String,
    pub answer: String,
    pub download: bool,
}

/// Response payload for the ask endpoint
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}

impl AskResponse {
    pub fn new(answer: String) -> Self {
        Self { answer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let request: AskRequest = serde_json::from_str(r#"{"question": "hi"}"#).unwrap();
        assert_eq!(request.question, "hi");
        assert!(request.answer.is_empty());
        assert!(!request.download);
    }

    #[test]
    fn test_full_request() {
        let request: AskRequest =
            serde_json::from_str(r#"{"question": "q", "answer": "a", "download": true}"#).unwrap();
        assert_eq!(request.answer, "a");
        assert!(request.download);
    }
}
