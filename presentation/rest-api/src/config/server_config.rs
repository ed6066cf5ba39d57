use std::env;

const DEFAULT_IP: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Server configuration for HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load server configuration from environment variables
    ///
    /// Environment variables:
    /// - SERVICE_IP: IP address to bind (default: "127.0.0.1")
    /// - SERVICE_PORT: Port to bind (default: 8080; unparsable values fall back to it)
    pub fn from_env() -> Self {
        let ip = env::var("SERVICE_IP")
            .ok()
            .filter(|ip| !ip.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IP.to_string());
        let port = parse_port(env::var("SERVICE_PORT").ok().as_deref());

        Self { ip, port }
    }

    /// Get the bind address as "ip:port"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
