pub mod redis;

use std::fmt;
use thiserror::Error;

pub const PRODUCTION: &str = "production";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set when NODE_ENV is \"production\"")]
    MissingVar(&'static str),
}

// Unset variables read as "".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub telegram_bot_token: String,
    pub last_fm_api_key: String,
    pub last_fm_secret_key: String,
    pub node_env: String,
    pub redis_url: String,
    pub redis_password: String,
}

impl Environment {
    pub fn deployment_mode(&self) -> Result<DeploymentMode, ConfigError> {
        DeploymentMode::from_environment(self)
    }
}

// Secrets stay out of log lines.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("telegram_bot_token", &redact(&self.telegram_bot_token))
            .field("last_fm_api_key", &self.last_fm_api_key)
            .field("last_fm_secret_key", &redact(&self.last_fm_secret_key))
            .field("node_env", &self.node_env)
            .field("redis_url", &self.redis_url)
            .field("redis_password", &redact(&self.redis_password))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum DeploymentMode {
    // Client library defaults: local server, no auth.
    Default,
    Production { url: String, password: String },
}

impl DeploymentMode {
    // Anything other than the exact string "production" falls back to Default.
    pub fn from_environment(env: &Environment) -> Result<Self, ConfigError> {
        if env.node_env != PRODUCTION {
            return Ok(DeploymentMode::Default);
        }

        if env.redis_url.is_empty() {
            return Err(ConfigError::MissingVar("REDIS_URL"));
        }
        if env.redis_password.is_empty() {
            return Err(ConfigError::MissingVar("REDIS_PASSWORD"));
        }

        Ok(DeploymentMode::Production {
            url: env.redis_url.clone(),
            password: env.redis_password.clone(),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentMode::Default => "default",
            DeploymentMode::Production { .. } => PRODUCTION,
        }
    }
}

impl fmt::Debug for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Default => f.write_str("Default"),
            DeploymentMode::Production { url, .. } => f
                .debug_struct("Production")
                .field("url", url)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production(url: &str, password: &str) -> Environment {
        Environment {
            node_env: "production".to_string(),
            redis_url: url.to_string(),
            redis_password: password.to_string(),
            ..Environment::default()
        }
    }

    #[test]
    fn unset_node_env_selects_default() {
        let mode = Environment::default().deployment_mode().unwrap();
        assert_eq!(mode, DeploymentMode::Default);
    }

    #[test]
    fn non_production_values_select_default() {
        for value in ["development", "test", "Production", "PRODUCTION", " production"] {
            let env = Environment {
                node_env: value.to_string(),
                redis_url: "redis://host:6379".to_string(),
                redis_password: "secret".to_string(),
                ..Environment::default()
            };
            assert_eq!(env.deployment_mode().unwrap(), DeploymentMode::Default, "{value}");
        }
    }

    #[test]
    fn production_carries_url_and_password() {
        let mode = production("redis://host:6379", "secret").deployment_mode().unwrap();
        assert_eq!(
            mode,
            DeploymentMode::Production {
                url: "redis://host:6379".to_string(),
                password: "secret".to_string(),
            }
        );
        assert_eq!(mode.name(), "production");
    }

    #[test]
    fn production_without_url_fails() {
        let err = production("", "secret").deployment_mode().unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("REDIS_URL"));
    }

    #[test]
    fn production_without_password_fails() {
        let err = production("redis://host:6379", "").deployment_mode().unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("REDIS_PASSWORD"));
        assert_eq!(
            err.to_string(),
            "REDIS_PASSWORD must be set when NODE_ENV is \"production\""
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let env = Environment {
            telegram_bot_token: "tok-Q81".to_string(),
            last_fm_secret_key: "shh-Z27".to_string(),
            ..production("redis://host:6379", "pw-XYZ")
        };
        let printed = format!("{:?} {:?}", env, env.deployment_mode().unwrap());
        assert!(!printed.contains("tok-Q81"));
        assert!(!printed.contains("shh-Z27"));
        assert!(!printed.contains("pw-XYZ"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("redis://host:6379"));
    }
}
