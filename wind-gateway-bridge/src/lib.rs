//! Wind bridge client
//!
//! The Wind market data library only ships native and Python bindings. It is
//! hosted in a small local bridge process that exposes the library calls
//! (`start`, `isconnected`, `wss`, `wsd`, `wsq`) as JSON over HTTP; this
//! crate is the client for that process and implements
//! [`MarketDataClient`](wind_gateway_core::MarketDataClient) on top of it.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wind_gateway_bridge::{BridgeClient, BridgeConfig};
//! use wind_gateway_core::{DataSource, MarketDataClient};
//!
//! # async fn run() {
//! let config = BridgeConfig::new("http://127.0.0.1:9500");
//! let loaded = BridgeClient::probe(config)
//!     .await
//!     .map(|client| Arc::new(client) as Arc<dyn MarketDataClient>);
//! let source = DataSource::acquire(loaded);
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::BridgeClient;
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
