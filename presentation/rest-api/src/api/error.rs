use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body returned by every failing endpoint.
#[derive(Object, Debug, Clone)]
pub struct ErrorResponse {
    /// Human-readable description of what went wrong
    pub error: String,
    /// Extra context such as the parse error or the upstream failure reason
    #[oai(skip_serializing_if_is_none)]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            error: error.into(),
            detail,
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
