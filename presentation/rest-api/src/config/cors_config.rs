use poem::middleware::Cors;
use std::env;

/// Initialize CORS middleware for cross-origin requests
///
/// Environment variables:
/// - CORS_ALLOWED_ORIGINS: Comma-separated list of allowed origins
///   (default: unset, every origin is allowed)
///
/// Configuration:
/// - Methods: GET, POST, OPTIONS
/// - Headers: content-type
pub fn init_cors() -> Cors {
    let origins = parse_origins(env::var("CORS_ALLOWED_ORIGINS").ok().as_deref());

    Cors::new()
        .allow_origins(origins)
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"])
}

/// An empty list leaves the CORS layer open to any origin.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
