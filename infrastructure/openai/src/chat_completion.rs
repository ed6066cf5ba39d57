use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use business::domain::chat::errors::ChatError;
use business::domain::chat::model::ChatPrompt;
use business::domain::chat::services::ChatCompletionService;

use crate::client::OpenAIClient;

const TEMPERATURE: f64 = 0.7;

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIErrorBody,
}

#[derive(Deserialize)]
struct OpenAIErrorBody {
    message: String,
}

pub struct ChatCompletionOpenAI {
    client: OpenAIClient,
}

impl ChatCompletionOpenAI {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn build_body(prompt: &ChatPrompt) -> serde_json::Value {
        json!({
            "model": prompt.model,
            "messages": [
                {"role": "system", "content": prompt.system_prompt},
                {"role": "user", "content": prompt.question.as_str()},
            ],
            "temperature": TEMPERATURE,
        })
    }

    fn parse_response(body: &str) -> Result<String, ChatError> {
        let parsed: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| ChatError::upstream(format!("malformed completion response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::upstream("completion response has no choices"))?
            .message
            .content
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ChatError::EmptyAnswer);
        }

        Ok(content)
    }

    /// Pulls the provider's own error message out of a failed response, if it sent one.
    fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<OpenAIErrorResponse>(body) {
            Ok(err) => format!("OpenAI returned {}: {}", status, err.error.message),
            Err(_) => format!("OpenAI returned {}", status),
        }
    }
}

#[async_trait]
impl ChatCompletionService for ChatCompletionOpenAI {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ChatError> {
        let auth_header = self.client.auth_header().ok_or(ChatError::MissingApiKey)?;

        let response = self
            .client
            .client
            .post(self.client.chat_completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header)
            .json(&Self::build_body(prompt))
            .send()
            .await
            .map_err(|e| ChatError::upstream(format!("request to OpenAI failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::upstream(format!("failed to read OpenAI response: {e}")))?;

        if !status.is_success() {
            return Err(ChatError::upstream(Self::describe_failure(status, &body)));
        }

        Self::parse_response(&body)
    }
}
