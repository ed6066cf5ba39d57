/// Errors raised while answering a chat question.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat.invalid_question")]
    InvalidQuestion,
    #[error("chat.missing_api_key")]
    MissingApiKey,
    #[error("chat.upstream_failed")]
    Upstream { reason: String },
    #[error("chat.empty_answer")]
    EmptyAnswer,
}

impl ChatError {
    pub fn upstream(reason: impl Into<String>) -> Self {
        ChatError::Upstream {
            reason: reason.into(),
        }
    }
}
