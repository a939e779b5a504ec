pub mod config;
pub use config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig};
