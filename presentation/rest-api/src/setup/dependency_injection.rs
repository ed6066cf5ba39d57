use std::sync::Arc;

use logger::TracingLogger;

use openai::chat_completion::ChatCompletionOpenAI;
use openai::client::OpenAIClient;

use business::application::chat::ask::AskQuestionUseCaseImpl;
use business::domain::chat::services::ChatCompletionService;

use crate::config::openai_config::OpenAIConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub chat_api: crate::api::chat::routes::ChatApi,
}

impl DependencyContainer {
    pub fn new(openai_config: &OpenAIConfig) -> Self {
        let openai_client =
            OpenAIClient::new(openai_config.api_key.clone(), openai_config.timeout)
                .with_base_url(openai_config.base_url.clone());
        let chat_completion = Arc::new(ChatCompletionOpenAI::new(openai_client));

        Self::with_completion_service(chat_completion)
    }

    /// Wires the APIs around any completion provider.
    pub fn with_completion_service(completion: Arc<dyn ChatCompletionService>) -> Self {
        let logger = Arc::new(TracingLogger::new("chat"));

        let ask_use_case = Arc::new(AskQuestionUseCaseImpl { completion, logger });

        Self {
            health_api: crate::api::health::routes::Api::new(),
            chat_api: crate::api::chat::routes::ChatApi::new(ask_use_case),
        }
    }
}
