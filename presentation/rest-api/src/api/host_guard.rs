use std::sync::Arc;

use poem::http::{StatusCode, header};
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};
use poem_openapi::payload::Json;

use crate::api::error::ErrorResponse;
use crate::config::host_config::AllowedHosts;

const FORWARDED_HOST: &str = "x-forwarded-host";

/// Rejects requests whose host is not in the configured allow-list before
/// they reach any route, health included.
pub struct HostGuard {
    allowed: Arc<AllowedHosts>,
}

impl HostGuard {
    pub fn new(allowed: AllowedHosts) -> Self {
        Self {
            allowed: Arc::new(allowed),
        }
    }
}

impl<E: Endpoint> Middleware<E> for HostGuard {
    type Output = HostGuardEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        HostGuardEndpoint {
            inner: ep,
            allowed: self.allowed.clone(),
        }
    }
}

pub struct HostGuardEndpoint<E> {
    inner: E,
    allowed: Arc<AllowedHosts>,
}

impl<E: Endpoint> Endpoint for HostGuardEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let host = request_host(&req);

        if !self.allowed.permits(host.as_deref()) {
            let shown = host.unwrap_or_else(|| "<missing>".to_string());
            tracing::warn!(
                host = %shown,
                path = %req.uri().path(),
                "Rejected request with disallowed host"
            );
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "Invalid Host header",
                    Some(format!("{} is not in ALLOWED_HOSTS", shown)),
                )),
            )
                .into_response());
        }

        self.inner.call(req).await.map(IntoResponse::into_response)
    }
}

/// Host as declared by the client: a proxy's `X-Forwarded-Host` wins over `Host`,
/// which wins over the URI authority. A forwarded chain is kept whole, so it
/// fails validation.
fn request_host(req: &Request) -> Option<String> {
    header_value(req, FORWARDED_HOST)
        .or_else(|| header_value(req, header::HOST.as_str()))
        .or_else(|| req.uri().host())
        .map(str::to_string)
}

fn header_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
