use serde::{Deserialize, Serialize};

pub mod preferences;
pub mod recommendation;

pub use preferences::{Intensity, Occasion, PreferenceSpec, Season};
pub use recommendation::{RecommendationItem, RecommendationResult, Recommendations};

// ============================================================================
// Chat Completion API Types
// ============================================================================

/// Request body for POST /chat/completions
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    /// Null when the model produced no text
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Response body of POST /chat/completions, reduced to what we read
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatMessage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if it carries any
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            max_tokens: 2000,
            temperature: 0.5,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 2000);
        assert_eq!(value["temperature"], 0.5);
    }

    #[test]
    fn test_first_content_present() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"a\": 1}"}}
            ]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_content(), Some("{\"a\": 1}".to_string()));
    }

    #[test]
    fn test_first_content_null_or_missing() {
        let null_content: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();
        assert_eq!(null_content.first_content(), None);

        let no_choices: ChatCompletionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(no_choices.first_content(), None);

        let blank: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  "}}]}"#,
        )
        .unwrap();
        assert_eq!(blank.first_content(), None);
    }
}
