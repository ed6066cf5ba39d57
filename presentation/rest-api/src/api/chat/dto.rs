use poem_openapi::Object;
use serde::Deserialize;

use business::domain::chat::use_cases::ask::AskQuestionParams;

/// Chat request body.
///
/// Every field must be a JSON string (optional ones may also be absent or
/// null). Decoded with serde: poem-openapi `Object`s coerce numbers and
/// booleans into strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's question to send to the chatbot
    pub question: String,
    /// OpenAI model to use (default: gpt-4o-mini)
    #[serde(default)]
    pub model: Option<String>,
    /// System prompt to steer assistant behavior
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl ChatRequest {
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl From<ChatRequest> for AskQuestionParams {
    fn from(req: ChatRequest) -> Self {
        Self {
            question: req.question,
            model: req.model,
            system_prompt: req.system_prompt,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ChatResponse {
    /// Assistant's answer, exactly as returned by the provider
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_decode_question_with_optional_fields() {
        let req = ChatRequest::from_json(json!({
            "question": "Hi",
            "model": "gpt-4o",
            "system_prompt": null
        }))
        .unwrap();

        assert_eq!(req.question, "Hi");
        assert_eq!(req.model.as_deref(), Some("gpt-4o"));
        assert_eq!(req.system_prompt, None);
    }

    #[test]
    fn should_reject_non_string_question() {
        for question in [json!(42), json!(true), json!(null), json!(["Hi"])] {
            assert!(ChatRequest::from_json(json!({"question": question})).is_err());
        }
    }

    #[test]
    fn should_reject_missing_question() {
        assert!(ChatRequest::from_json(json!({"model": "gpt-4o"})).is_err());
    }

    #[test]
    fn should_reject_non_string_overrides() {
        assert!(ChatRequest::from_json(json!({"question": "Hi", "model": 4})).is_err());
        assert!(ChatRequest::from_json(json!({"question": "Hi", "system_prompt": false})).is_err());
    }

    #[test]
    fn should_reject_non_object_body() {
        assert!(ChatRequest::from_json(json!("Hi")).is_err());
        assert!(ChatRequest::from_json(json!([])).is_err());
    }
}
