use std::sync::Arc;

use poem_openapi::{ApiResponse, OpenApi, payload::Json};

use business::domain::chat::use_cases::ask::AskQuestionUseCase;

use crate::api::chat::dto::{ChatRequest, ChatResponse};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct ChatApi {
    ask_use_case: Arc<dyn AskQuestionUseCase>,
}

impl ChatApi {
    pub fn new(ask_use_case: Arc<dyn AskQuestionUseCase>) -> Self {
        Self { ask_use_case }
    }
}

/// Chat API
///
/// Proxies a single question to the language model and relays the answer.
#[OpenApi]
impl ChatApi {
    /// Ask the chatbot a question
    ///
    /// Forwards the question to OpenAI and returns the generated answer.
    /// Nothing is persisted and failed upstream calls are not retried.
    #[oai(path = "/chat", method = "post", tag = "ApiTags::Chat")]
    async fn chat(&self, body: Json<serde_json::Value>) -> PostChatResponse {
        let request = match ChatRequest::from_json(body.0) {
            Ok(request) => request,
            Err(err) => return invalid_request(err.to_string()),
        };

        match self.ask_use_case.execute(request.into()).await {
            Ok(answer) => PostChatResponse::Ok(Json(ChatResponse { answer })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => PostChatResponse::BadRequest(json),
                    _ => PostChatResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "invalid_chat_body")]
pub enum PostChatResponse {
    #[oai(status = 200)]
    Ok(Json<ChatResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

/// Missing or non-JSON bodies never reach the handler; answer them with a 400 body.
fn invalid_chat_body(err: poem::Error) -> PostChatResponse {
    invalid_request(err.to_string())
}

fn invalid_request(detail: String) -> PostChatResponse {
    PostChatResponse::BadRequest(Json(ErrorResponse::new(
        "Field 'question' is required and must be a non-empty string.",
        Some(detail),
    )))
}
