//! Runtime configuration for feed sources.
//!
//! Values come from environment variables so that API tokens never live in
//! source code. Loading a `.env` file is left to the binary.

use crate::error::VayuError;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.waqi.info";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WORKERS: usize = 4;

/// Parse an optional numeric environment variable with a default value.
macro_rules! parse_env_num {
    ($var_name:expr, $ty:ty, $default:expr) => {
        match env::var($var_name) {
            Ok(v) => v.trim().parse::<$ty>().map_err(|e| {
                VayuError::Config(format!("invalid {}: '{}' ({})", $var_name, v, e))
            })?,
            Err(_) => $default,
        }
    };
}

/// Settings for talking to the air-quality feed API.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Feed API base URL.
    pub base_url: String,
    /// API token.
    pub token: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Maximum number of concurrent requests.
    pub workers: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl SourceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// Required:
    /// - `WAQI_TOKEN` – feed API token
    ///
    /// Optional:
    /// - `WAQI_BASE_URL` – API base URL (default: https://api.waqi.info)
    /// - `VAYU_TIMEOUT_SECS` – request timeout (default: 10)
    /// - `VAYU_WORKERS` – concurrent requests (default: 4)
    pub fn from_env() -> Result<Self, VayuError> {
        Self::from_env_with_token(None)
    }

    /// Like [`SourceConfig::from_env`], but an explicit token wins over
    /// `WAQI_TOKEN`.
    pub fn from_env_with_token(token: Option<String>) -> Result<Self, VayuError> {
        let token = token
            .or_else(|| env::var("WAQI_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| VayuError::Config("WAQI_TOKEN must be set in .env or environment".into()))?;
        let base_url = env::var("WAQI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_env_num!("VAYU_TIMEOUT_SECS", u64, DEFAULT_TIMEOUT_SECS);
        let workers = parse_env_num!("VAYU_WORKERS", usize, DEFAULT_WORKERS);

        let config = Self {
            base_url,
            token,
            timeout_secs,
            workers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values that cannot be caught by parsing alone.
    pub fn validate(&self) -> Result<(), VayuError> {
        if self.token.trim().is_empty() {
            return Err(VayuError::Config("API token must not be empty".into()));
        }
        if self.workers == 0 {
            return Err(VayuError::Config("workers must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(VayuError::Config("timeout must be at least 1 second".into()));
        }
        Ok(())
    }

    /// Token with all but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }

    /// Log the loaded configuration, token masked.
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  WAQI_BASE_URL     : {}", self.base_url);
        tracing::info!("  WAQI_TOKEN        : {}", self.masked_token());
        tracing::info!("  VAYU_TIMEOUT_SECS : {}", self.timeout_secs);
        tracing::info!("  VAYU_WORKERS      : {}", self.workers);
    }
}
