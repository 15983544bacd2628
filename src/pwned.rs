//! Pwned Passwords range client
//!
//! Handles configuration and querying of the breach-corpus range API.

use std::time::Duration;

use thiserror::Error;
use ureq::{Agent, AgentBuilder};

pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com/range";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const API_URL_ENV: &str = "PWD_PWNED_API_URL";
pub const TIMEOUT_ENV: &str = "PWD_PWNED_TIMEOUT_SECS";

/// Infrastructure failures of the breach lookup. Never a policy verdict.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Breach lookup request failed: {0}")]
    Transport(String),
    #[error("Breach lookup returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to read breach lookup response: {0}")]
    Body(#[from] std::io::Error),
    #[error("Malformed breach lookup response line: {0:?}")]
    MalformedResponse(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid breach lookup timeout: {0}")]
    InvalidTimeout(String),
    #[error("Invalid breach lookup URL: {0}")]
    InvalidUrl(String),
}

/// Supplies the range listing for a 5-character hash prefix.
pub trait RangeLookup: Send + Sync {
    /// Returns the raw response body (`SUFFIX:COUNT` lines).
    fn fetch_range(&self, prefix: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PwnedConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for PwnedConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PwnedConfig {
    /// Builds the configuration from the environment.
    ///
    /// Priority:
    /// 1. Environment variables `PWD_PWNED_API_URL` and `PWD_PWNED_TIMEOUT_SECS`
    /// 2. Defaults (`https://api.pwnedpasswords.com/range`, 10 seconds)
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The URL is not http(s)
    /// - The timeout is not a positive integer
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_url = url;
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.api_url.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        Ok(())
    }

    /// Full range URL for a prefix.
    pub fn range_url(&self, prefix: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), prefix)
    }
}

/// Blocking HTTP client for the range API. One request per lookup, no retries.
#[derive(Debug, Clone)]
pub struct PwnedClient {
    agent: Agent,
    config: PwnedConfig,
}

impl PwnedClient {
    pub fn new(config: PwnedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let agent = AgentBuilder::new().timeout(config.timeout).build();
        Ok(Self { agent, config })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(PwnedConfig::from_env()?)
    }

    pub fn config(&self) -> &PwnedConfig {
        &self.config
    }
}

impl RangeLookup for PwnedClient {
    fn fetch_range(&self, prefix: &str) -> Result<String, LookupError> {
        let url = self.config.range_url(prefix);

        #[cfg(feature = "tracing")]
        tracing::debug!("Querying breach corpus range {}", prefix);

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Breach lookup FAILED: HTTP {} from {}", status, url);
                return Err(LookupError::Status { status, url });
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Breach lookup FAILED: {}", e);
                return Err(LookupError::Transport(e.to_string()));
            }
        };

        if response.status() != 200 {
            return Err(LookupError::Status {
                status: response.status(),
                url,
            });
        }

        Ok(response.into_string()?)
    }
}
