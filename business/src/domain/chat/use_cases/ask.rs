use async_trait::async_trait;

use crate::domain::chat::errors::ChatError;

pub struct AskQuestionParams {
    pub question: String,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
}

#[async_trait]
pub trait AskQuestionUseCase: Send + Sync {
    async fn execute(&self, params: AskQuestionParams) -> Result<String, ChatError>;
}
