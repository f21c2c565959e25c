use std::sync::{Arc, OnceLock};

use redis::aio::MultiplexedConnection;
use redis::{Client, ConnectionInfo, IntoConnectionInfo, RedisError};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::config::{ConfigError, DeploymentMode, Environment};

pub const DEFAULT_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid Redis connection parameters: {0}")]
    Redis(#[from] RedisError),
    #[error("Redis connection failed: {0}")]
    Connect(String),
    #[error("no tokio runtime to drive the Redis connection")]
    NoRuntime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Failed(String),
}

// Clones share the same connection attempt
#[derive(Clone)]
pub struct CacheClient {
    client: Client,
    mode: DeploymentMode,
    state: watch::Receiver<ConnectionState>,
    connection: Arc<OnceLock<MultiplexedConnection>>,
}

impl CacheClient {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn mode(&self) -> &DeploymentMode {
        &self.mode
    }

    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    pub fn connection(&self) -> Option<MultiplexedConnection> {
        self.connection.get().cloned()
    }

    // Waits for the attempt started by create() to settle
    pub async fn ready(&self) -> Result<MultiplexedConnection, CacheError> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|s| *s != ConnectionState::Connecting)
            .await
            .map(|s| (*s).clone())
            .map_err(|_| CacheError::Connect("connection task ended before settling".to_string()))?;

        match settled {
            ConnectionState::Failed(reason) => Err(CacheError::Connect(reason)),
            _ => self
                .connection()
                .ok_or_else(|| CacheError::Connect("connection missing after connect".to_string())),
        }
    }
}

pub fn connection_info(mode: &DeploymentMode) -> Result<ConnectionInfo, CacheError> {
    match mode {
        DeploymentMode::Default => Ok(DEFAULT_URL.into_connection_info()?),
        DeploymentMode::Production { url, password } => {
            let mut info = url.as_str().into_connection_info()?;
            info.redis.password = Some(password.clone());
            Ok(info)
        }
    }
}

// Returns before the connection attempt completes
pub fn create(env: &Environment) -> Result<CacheClient, CacheError> {
    let mode = env.deployment_mode()?;
    let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
    let client = Client::open(connection_info(&mode)?)?;
    debug!("Opened Redis client for {} mode", mode.name());

    let (tx, rx) = watch::channel(ConnectionState::Connecting);
    let connection = Arc::new(OnceLock::new());

    runtime.spawn(connect(client.clone(), tx, connection.clone()));

    Ok(CacheClient {
        client,
        mode,
        state: rx,
        connection,
    })
}

async fn connect(
    client: Client,
    state: watch::Sender<ConnectionState>,
    slot: Arc<OnceLock<MultiplexedConnection>>,
) {
    match client.get_multiplexed_async_connection().await {
        Ok(conn) => {
            let _ = slot.set(conn);
            info!("Connected to Redis");
            state.send_replace(ConnectionState::Connected);
        }
        Err(e) => {
            error!("Failed to connect to Redis: {}", e);
            state.send_replace(ConnectionState::Failed(e.to_string()));
        }
    }
}
