use poem_openapi::{Object, OpenApi, payload::Json};

use crate::api::tags::ApiTags;

const HEALTH_MESSAGE: &str = "Server is up!";

/// Health check response
#[derive(Debug, Clone, Object)]
pub struct HealthResponse {
    /// Fixed liveness message
    pub message: String,
}

/// Health API for monitoring and infrastructure checks
pub struct Api;

impl Api {
    pub fn new() -> Self {
        Self
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Always returns `{"message": "Server is up!"}`; it has no dependencies
    /// and no failure path beyond host validation.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        Json(HealthResponse {
            message: HEALTH_MESSAGE.to_string(),
        })
    }
}
