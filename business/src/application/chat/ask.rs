use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::chat::errors::ChatError;
use crate::domain::chat::model::{Question, create_prompt};
use crate::domain::chat::services::ChatCompletionService;
use crate::domain::chat::use_cases::ask::{AskQuestionParams, AskQuestionUseCase};
use crate::domain::logger::Logger;

pub struct AskQuestionUseCaseImpl {
    pub completion: Arc<dyn ChatCompletionService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AskQuestionUseCase for AskQuestionUseCaseImpl {
    async fn execute(&self, params: AskQuestionParams) -> Result<String, ChatError> {
        let question = Question::new(&params.question).inspect_err(|_| {
            self.logger.warn("Rejected chat request with an empty question");
        })?;

        let prompt = create_prompt(question, params.model, params.system_prompt);
        let request_id = Uuid::new_v4();

        self.logger.info(&format!(
            "[{}] Asking {} a question of {} chars",
            request_id,
            prompt.model,
            prompt.question.as_str().chars().count()
        ));

        match self.completion.complete(&prompt).await {
            Ok(answer) => {
                self.logger.info(&format!(
                    "[{}] Received answer of {} chars",
                    request_id,
                    answer.chars().count()
                ));
                Ok(answer)
            }
            Err(err) => {
                let reason = match &err {
                    ChatError::Upstream { reason } => reason.clone(),
                    other => other.to_string(),
                };
                self.logger
                    .error(&format!("[{}] Chat completion failed: {}", request_id, reason));
                Err(err)
            }
        }
    }
}
