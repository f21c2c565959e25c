pub mod config;
pub mod utils;

pub use config::redis::{create, CacheClient, CacheError, ConnectionState};
pub use config::{ConfigError, DeploymentMode, Environment};
