use super::{
    cors_config, host_config::AllowedHosts, openai_config::OpenAIConfig,
    server_config::ServerConfig,
};
use poem::middleware::Cors;

/// Process-wide configuration, built once in `main` and never mutated.
pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub allowed_hosts: AllowedHosts,
    pub openai: OpenAIConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            allowed_hosts: AllowedHosts::from_env(),
            openai: OpenAIConfig::from_env(),
        }
    }
}
