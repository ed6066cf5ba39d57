use async_trait::async_trait;

use super::errors::ChatError;
use super::model::ChatPrompt;

/// Service port for the external chat-completion provider.
///
/// Implementations perform a single call with no retry and return the
/// provider's answer verbatim.
#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ChatError>;
}
