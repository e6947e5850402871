//! HTTP client for the bridge process
//!
//! Every library call is a single request; there are no retries. Replies to
//! data calls carry the library's own result object and are read with
//! [`RawResult::from_vendor`].

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use wind_gateway_core::{MarketDataClient, RawResult};

#[derive(Debug, Serialize)]
struct WssRequest<'a> {
    codes: &'a str,
    fields: &'a str,
    options: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WsdRequest<'a> {
    codes: &'a str,
    fields: &'a str,
    begin_time: &'a str,
    end_time: &'a str,
    options: &'a str,
}

#[derive(Debug, Serialize)]
struct WsqRequest<'a> {
    codes: &'a str,
    fields: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConnectedReply {
    connected: bool,
}

#[derive(Debug, Clone)]
pub struct BridgeClient {
    client: Client,
    config: Arc<BridgeConfig>,
}

impl BridgeClient {
    /// Create a new client with the given configuration
    pub fn new(config: BridgeConfig) -> BridgeResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(BridgeError::NetworkError)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Builds a client and checks that the bridge answers. This is how the
    /// process decides whether the vendor library is available at all.
    pub async fn probe(config: BridgeConfig) -> BridgeResult<Self> {
        let client = Self::new(config)?;
        client.health().await?;
        info!("Wind bridge reachable at {}", client.config.base_url);
        Ok(client)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    pub fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub async fn health(&self) -> BridgeResult<()> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BridgeResult<T> {
        let url = self.url(path);
        if self.config.enable_logging {
            debug!("Request: GET {}", url);
        }

        let response = self.client.get(&url).send().await?;
        let text = Self::check_status(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POSTs a library call and reads the library result object.
    async fn call<B: Serialize>(&self, path: &str, body: &B) -> BridgeResult<RawResult> {
        let url = self.url(path);
        if self.config.enable_logging {
            debug!("Request: POST {} {}", url, serde_json::to_string(body)?);
        }

        let response = self.client.post(&url).json(body).send().await?;
        let text = Self::check_status(response).await?;

        if self.config.enable_logging {
            debug!("Response body: {}", text);
        }

        let value: Value = serde_json::from_str(&text)?;
        Ok(RawResult::from_vendor(value))
    }

    async fn check_status(response: Response) -> BridgeResult<String> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(BridgeError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[async_trait]
impl MarketDataClient for BridgeClient {
    async fn start(&self) -> wind_gateway_core::Result<RawResult> {
        Ok(self.call("/start", &serde_json::json!({})).await?)
    }

    async fn is_connected(&self) -> wind_gateway_core::Result<bool> {
        let reply: ConnectedReply = self.get_json("/isconnected").await?;
        Ok(reply.connected)
    }

    async fn wss(
        &self,
        codes: &str,
        fields: &str,
        options: &str,
    ) -> wind_gateway_core::Result<RawResult> {
        let body = WssRequest {
            codes,
            fields,
            options,
        };
        Ok(self.call("/wss", &body).await?)
    }

    async fn wsd(
        &self,
        codes: &str,
        fields: &str,
        begin: &str,
        end: &str,
        options: &str,
    ) -> wind_gateway_core::Result<RawResult> {
        let body = WsdRequest {
            codes,
            fields,
            begin_time: begin,
            end_time: end,
            options,
        };
        Ok(self.call("/wsd", &body).await?)
    }

    async fn wsq(&self, codes: &str, fields: &str) -> wind_gateway_core::Result<RawResult> {
        Ok(self.call("/wsq", &WsqRequest { codes, fields }).await?)
    }

    fn supports_quotes(&self) -> bool {
        self.config.quotes_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = BridgeClient::new(BridgeConfig::new("http://127.0.0.1:9500/")).unwrap();
        assert_eq!(client.url("/wss"), "http://127.0.0.1:9500/wss");
        assert_eq!(client.url("wsd"), "http://127.0.0.1:9500/wsd");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(BridgeClient::new(BridgeConfig::new("")).is_err());
    }
}
