use std::env;
use std::path::Path;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment as EnvironmentSource;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
}

/// Deployment stage, used to pick the default log verbosity.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Development,
    Production,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_secs: i64,
}

fn default_timeout_secs() -> u64 {
    5
}

/// Upper bound on `token.ttl_secs` (one year).
const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

impl Environment {
    /// Default `tracing` filter directive for this stage.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Local | Environment::Development => "sso_service=debug,sso_server=debug",
            Environment::Production => "sso_service=error,sso_server=error",
        }
    }
}

impl ServerConfig {
    /// Deadline applied to requests that carry none of their own.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TokenConfig {
    /// Lifetime of issued session tokens.
    ///
    /// # Errors
    /// * `Message` - `ttl_secs` is not positive or exceeds one year
    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.ttl_secs <= 0 || self.ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::Message(format!(
                "token.ttl_secs must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_SECS, self.ttl_secs
            )));
        }

        chrono::TimeDelta::try_seconds(self.ttl_secs).ok_or_else(|| {
            ConfigError::Message(format!("token.ttl_secs out of range: {}", self.ttl_secs))
        })
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__TTL_SECS, etc.)
    /// 2. Explicit config file (`path`, or the CONFIG_PATH variable)
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os("CONFIG_PATH").map(Into::into));

        let mut builder = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(explicit) = explicit {
            builder = builder.add_source(File::from(explicit).required(true));
        }

        let configuration = builder
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__TTL_SECS=600 overrides token.ttl_secs
            .add_source(EnvironmentSource::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values that would make every request or token unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "server.timeout_secs must be positive".to_string(),
            ));
        }

        self.token.ttl()?;

        Ok(())
    }
}
