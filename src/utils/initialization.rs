use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::redis::{self, CacheClient, CacheError};
use crate::config::Environment;

// Logs go to stderr; RUST_LOG overrides the default "info" filter
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn init_cache_client(env: &Environment) -> Result<CacheClient, CacheError> {
    let cache = redis::create(env)?;
    info!("Redis client created in {} mode", cache.mode().name());
    Ok(cache)
}
