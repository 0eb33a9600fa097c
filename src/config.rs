//! Configuration management for RAX FTP Client
//!
//! All values ship with built-in defaults; an optional
//! `rax-ftp-client.toml` next to the working directory and
//! `RAX_FTP_CLIENT_*` environment variables override them.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BUFFER_SIZE: usize = 8192;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILE: &str = "rax-ftp-client";
const ENV_PREFIX: &str = "RAX_FTP_CLIENT";

/// Client configuration, loaded once per invocation
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Buffer size for data-channel reads
    pub buffer_size: usize,

    /// TCP connect timeout for both channels
    pub connect_timeout_secs: u64,

    /// Read timeout on established connections
    pub read_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from defaults, the optional config file, and
    /// environment overrides, in that precedence order.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("buffer_size", DEFAULT_BUFFER_SIZE as i64)?
            .set_default("connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS as i64)?
            .set_default("read_timeout_secs", DEFAULT_READ_TIMEOUT_SECS as i64)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.read_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "read_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get read timeout as Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
