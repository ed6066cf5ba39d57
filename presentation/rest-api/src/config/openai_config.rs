use std::env;
use std::time::Duration;

use openai::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Configuration for OpenAI API access.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Load OpenAI configuration from environment variables
    ///
    /// Environment variables:
    /// - OPENAI_API_KEY: Upstream credential (optional; chat fails at call time without it)
    /// - OPENAI_BASE_URL: API base URL (default: "https://api.openai.com/v1")
    /// - OPENAI_TIMEOUT_SECS: Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            api_key: non_blank(env::var("OPENAI_API_KEY").ok()),
            base_url: non_blank(env::var("OPENAI_BASE_URL").ok())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: parse_timeout(env::var("OPENAI_TIMEOUT_SECS").ok().as_deref()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}
