//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::networking::ApiClientConfig;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use super::env::EnvironmentConfig;

/// Default configuration values
pub mod defaults {
    pub const API_URL: &str = "http://localhost:3000/api";
    pub const NET_TIMEOUT_MS: &str = "5000";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn api_url() -> String {
        defaults::API_URL.to_string()
    }

    pub fn net_timeout_ms() -> u64 {
        defaults::NET_TIMEOUT_MS.parse().unwrap()
    }

    pub fn log_level() -> u8 {
        defaults::LOG_LEVEL.parse().unwrap()
    }

    pub fn log_format() -> LogFormat {
        defaults::LOG_FORMAT.parse().unwrap()
    }

    pub fn log_output() -> LogOutput {
        defaults::LOG_OUTPUT.parse().unwrap()
    }

    pub fn color() -> ColorIntent {
        defaults::COLOR.parse().unwrap()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Marketplace API base URL
    #[arg(long, env = "PROMPTMART_API_URL", default_value = defaults::API_URL)]
    #[serde(default = "default_fns::api_url")]
    pub api_url: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "PROMPTMART_NET_TIMEOUT_MS", default_value = defaults::NET_TIMEOUT_MS)]
    #[serde(default = "default_fns::net_timeout_ms")]
    pub net_timeout_ms: u64,

    /// Token file location (defaults to the user data directory)
    #[arg(long, env = "PROMPTMART_TOKEN_FILE")]
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "PROMPTMART_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json)
    #[arg(long, env = "PROMPTMART_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "PROMPTMART_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "PROMPTMART_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_fns::api_url(),
            net_timeout_ms: default_fns::net_timeout_ms(),
            token_file: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "api_url must not be empty".to_string(),
            });
        }
        if self.net_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net_timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Facade configuration derived from this application config
    pub fn api_client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.api_url.clone(),
            timeout_ms: self.net_timeout_ms,
        }
    }

    /// Logger configuration, with color resolved against the ambient
    /// NO_COLOR/FORCE_COLOR/CLICOLOR/CI conventions
    pub fn logger_config(&self) -> Result<LoggerConfig, ConfigError> {
        let env_config = EnvironmentConfig::load()?;
        Ok(LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: env_config.apply_color_config(self.color),
        })
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
