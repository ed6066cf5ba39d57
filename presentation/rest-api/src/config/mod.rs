pub mod app_config;
pub mod cors_config;
pub mod host_config;
pub mod openai_config;
pub mod server_config;
