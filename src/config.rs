//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `FRIDGETAG__SECTION__KEY` environment variables, then command-line
//! overrides applied by the CLI.

use crate::constants::{
    APP_NAME, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT,
    ENV_PREFIX, LOG_LEVELS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
host                  = "0.0.0.0"
port                  = 8000
max_upload_bytes      = 10485760
require_txt_extension = true

[logging]
level = "info"

[output]
pretty = true
"#;

/// HTTP service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Largest accepted upload body, in bytes
    pub max_upload_bytes: usize,

    /// Reject uploads whose filename does not end in `.txt`
    pub require_txt_extension: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            require_txt_extension: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when neither `RUST_LOG` nor a CLI flag sets one
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written by the CLI
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Global configuration for the parser service and CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load defaults, then `config_file` (if any), then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder().add_source(::config::File::from_str(
            DEFAULT_CONFIG,
            ::config::FileFormat::Toml,
        ));

        if let Some(path) = config_file {
            debug!("Adding config file layer: {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(true));
        }

        let config: Config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Default location of the user config file
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join("config.toml"))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Override the bind address
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    /// Override the bind port
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Override the upload limit
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.server.max_upload_bytes = bytes;
        self
    }

    /// Accept uploads regardless of filename extension
    pub fn without_txt_extension_check(mut self) -> Self {
        self.server.require_txt_extension = false;
        self
    }

    /// Override the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::configuration("server.port must be greater than 0"));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(Error::configuration(
                "server.max_upload_bytes must be greater than 0",
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::configuration(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
