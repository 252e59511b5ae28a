use serde::{Deserialize, Serialize};

use super::prompt::{SYSTEM_PROMPT, user_prompt};

pub const MAX_TOKENS: u32 = 5000;
pub const TEMPERATURE: f32 = 1.2;
pub const TOP_P: f32 = 0.95;
pub const FREQUENCY_PENALTY: f32 = 0.2;
pub const PRESENCE_PENALTY: f32 = 0.6;

/// Request body for the chat-completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessage>,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content),
        }
    }
}

impl ChatCompletionRequest {
    /// Builds the two-turn request with the fixed sampling parameters.
    pub fn for_question(model: &str, question: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT.to_string()),
                ChatMessage::new("user", user_prompt(question)),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            frequency_penalty: FREQUENCY_PENALTY,
            presence_penalty: PRESENCE_PENALTY,
        }
    }
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice, or `None` when it is absent or blank.
    pub fn first_content(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest::for_question("gpt-4", "What is X?");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["max_tokens"], 5000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert!(
            value["messages"][1]["content"]
                .as_str()
                .unwrap()
                .contains("What is X?")
        );
        assert!(request.temperature > 1.0);
        assert!(request.presence_penalty > request.frequency_penalty);
    }

    #[test]
    fn test_first_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "  X is Y.  " } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }))
        .unwrap();
        assert_eq!(response.first_content().as_deref(), Some("X is Y."));
    }

    #[test]
    fn test_first_content_missing_or_blank() {
        let empty: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_content().is_none());

        let blank: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "   " } }]
        }))
        .unwrap();
        assert!(blank.first_content().is_none());

        let null_content: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert!(null_content.first_content().is_none());
    }
}
