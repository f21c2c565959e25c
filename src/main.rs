use lastfm_bot_common::utils::env;
use lastfm_bot_common::utils::initialization::{init_cache_client, init_tracing};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    match env::configure() {
        Ok(pairs) => info!("Loaded {} variables from .env", pairs.len()),
        Err(e) => warn!("No .env loaded: {}", e),
    }

    let environment = env::get();
    let cache = init_cache_client(&environment)?;

    // The handle is usable before this resolves; waiting here only reports the outcome.
    match cache.ready().await {
        Ok(_) => info!("Redis connection ready"),
        Err(e) => error!("Continuing without Redis: {}", e),
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
