use anyhow::Result;
use config::{builder::DefaultState, Config as ConfigLoader, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the vendor bridge. Without one the gateway serves mock data.
    pub bridge_url: Option<String>,
    pub bridge_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false))
                .add_source(Environment::with_prefix("WIND_API").try_parsing(true)),
        )
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Self::default();
        Ok(ConfigLoader::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("bridge_timeout_secs", defaults.bridge_timeout_secs as i64)?
            .set_default("log_level", defaults.log_level)?)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let mut config: Self = builder.build()?.try_deserialize()?;
        config.bridge_url = config.bridge_url.filter(|url| !url.trim().is_empty());
        Ok(config)
    }

    /// Listener address. The host may be a name or a bare IPv6 address;
    /// resolution happens at bind time.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn bridge_timeout(&self) -> Duration {
        Duration::from_secs(self.bridge_timeout_secs)
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        format!(
            "wind_gateway={level},wind_gateway_api={level},wind_gateway_core={level},wind_gateway_bridge={level},tower_http=debug",
            level = self.log_level
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            bridge_url: None,
            bridge_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}
