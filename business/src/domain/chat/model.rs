use super::errors::ChatError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// A user question, guaranteed non-blank and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ChatError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ChatError::InvalidQuestion);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the completion provider needs to answer one question.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub question: Question,
    pub model: String,
    pub system_prompt: String,
}

/// Builds a prompt, falling back to the defaults for blank or missing overrides.
pub fn create_prompt(
    question: Question,
    model: Option<String>,
    system_prompt: Option<String>,
) -> ChatPrompt {
    ChatPrompt {
        question,
        model: non_blank(model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        system_prompt: non_blank(system_prompt)
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
