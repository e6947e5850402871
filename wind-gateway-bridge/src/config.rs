//! Bridge client configuration

use crate::error::{BridgeError, BridgeResult};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Base URL of the bridge process
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Whether the hosted library exposes the quote call
    pub quotes_enabled: bool,

    /// Log request and reply bodies at debug level
    pub enable_logging: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9500".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("wind-gateway/{}", env!("CARGO_PKG_VERSION")),
            quotes_enabled: true,
            enable_logging: false,
        }
    }
}

impl BridgeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_quotes(mut self, enabled: bool) -> Self {
        self.quotes_enabled = enabled;
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> BridgeResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(BridgeError::ConfigurationError(
                "Bridge URL cannot be empty".to_string(),
            ));
        }

        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BridgeError::ConfigurationError(format!(
                "Unsupported bridge URL scheme: {}",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(BridgeError::ConfigurationError(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
