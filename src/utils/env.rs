use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::debug;

use crate::config::Environment;

pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const LAST_FM_API_KEY: &str = "LAST_FM_API_KEY";
pub const LAST_FM_SHARED_SECRET: &str = "LAST_FM_SHARED_SECRET";
pub const NODE_ENV: &str = "NODE_ENV";
pub const REDIS_URL: &str = "REDIS_URL";
pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";

pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-unicode values count as unset.
        env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

// Loads .env from the current dir or a parent; already-set variables win
pub fn configure() -> Result<Vec<(String, String)>, dotenv::Error> {
    apply(dotenv::dotenv_iter()?)
}

pub fn configure_from<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>, dotenv::Error> {
    apply(dotenv::from_path_iter(path.as_ref())?)
}

fn apply<I>(iter: I) -> Result<Vec<(String, String)>, dotenv::Error>
where
    I: Iterator<Item = Result<(String, String), dotenv::Error>>,
{
    let pairs = iter.collect::<Result<Vec<_>, _>>()?;

    for (key, value) in &pairs {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
        } else {
            debug!("{} already set, keeping process value", key);
        }
    }

    Ok(pairs)
}

// Re-reads the process environment on every call
pub fn get() -> Environment {
    Environment::from_source(&ProcessEnv)
}

impl Environment {
    pub fn from_source<S: EnvSource + ?Sized>(source: &S) -> Self {
        let read = |key: &str| source.var(key).unwrap_or_default();

        Environment {
            telegram_bot_token: read(TELEGRAM_BOT_TOKEN),
            last_fm_api_key: read(LAST_FM_API_KEY),
            last_fm_secret_key: read(LAST_FM_SHARED_SECRET),
            node_env: read(NODE_ENV),
            redis_url: read(REDIS_URL),
            redis_password: read(REDIS_PASSWORD),
        }
    }
}
