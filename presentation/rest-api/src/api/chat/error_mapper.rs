use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::chat::errors::ChatError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for ChatError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let code = self.to_string();
        let (status, error, detail) = match self {
            ChatError::InvalidQuestion => (
                StatusCode::BAD_REQUEST,
                "Field 'question' is required and must be a non-empty string.",
                code,
            ),
            ChatError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OPENAI_API_KEY environment variable is not set.",
                code,
            ),
            ChatError::Upstream { reason } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve response from OpenAI.",
                reason,
            ),
            ChatError::EmptyAnswer => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Empty response from OpenAI.",
                code,
            ),
        };

        (status, Json(ErrorResponse::new(error, Some(detail))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_invalid_question_to_bad_request() {
        let (status, body) = ChatError::InvalidQuestion.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.detail.as_deref(), Some("chat.invalid_question"));
    }

    #[test]
    fn should_distinguish_missing_key_from_upstream_failure() {
        let (missing_status, missing) = ChatError::MissingApiKey.into_error_response();
        let (upstream_status, upstream) =
            ChatError::upstream("OpenAI returned 429 Too Many Requests").into_error_response();

        assert_eq!(missing_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(missing.0.error, upstream.0.error);
        assert_eq!(
            upstream.0.detail.as_deref(),
            Some("OpenAI returned 429 Too Many Requests")
        );
    }
}
