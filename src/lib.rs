pub mod cli;
pub mod config;
pub mod config_manager;
pub mod error;
pub mod upstream;

pub use config::{DevServerConfig, Plugin, ProxyRoute, DEFAULT_BACKEND};
pub use config_manager::{ConfigFile, ConfigManager};
pub use error::ConfigError;
pub use upstream::UpstreamRequest;
