//! Data source adapter.
//!
//! A [`DataSource`] hides whether requests are served by the vendor library
//! or by the built-in mock. The choice is made once, when the source is
//! built, and holds for the lifetime of the value.

pub mod mock;

use chrono::{Local, NaiveDate};
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{Query, QueryWindow, RawResult, DATE_FORMAT, SUCCESS_CODE};
use crate::traits::MarketDataClient;

pub use mock::MockBackend;

pub enum Backend {
    Real(Arc<dyn MarketDataClient>),
    Mock(MockBackend),
}

pub struct DataSource {
    backend: Backend,
    connected: AtomicBool,
}

impl DataSource {
    pub fn real(client: Arc<dyn MarketDataClient>) -> Self {
        Self::with_backend(Backend::Real(client))
    }

    pub fn mock() -> Self {
        Self::with_backend(Backend::Mock(MockBackend::new()))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            connected: AtomicBool::new(false),
        }
    }

    /// Uses the vendor client if it could be loaded, the mock otherwise.
    pub fn acquire<E: Display>(loaded: Result<Arc<dyn MarketDataClient>, E>) -> Self {
        match loaded {
            Ok(client) => {
                info!("Vendor market data client loaded");
                Self::real(client)
            }
            Err(err) => {
                warn!("Vendor market data client unavailable, serving mock data: {}", err);
                Self::mock()
            }
        }
    }

    /// Whether the vendor backend is in use.
    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Real(_))
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Real(_) => "vendor",
            Backend::Mock(_) => "mock",
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Starts a session and records the outcome. Never fails; problems are
    /// logged and reported as `false`.
    pub async fn connect(&self) -> bool {
        let connected = match &self.backend {
            Backend::Mock(_) => {
                info!("Using mock market data backend");
                true
            }
            Backend::Real(client) => Self::start_session(client.as_ref()).await,
        };

        self.connected.store(connected, Ordering::Relaxed);
        connected
    }

    async fn start_session(client: &dyn MarketDataClient) -> bool {
        let reply = match client.start().await {
            Ok(reply) => reply,
            Err(err) => {
                error!("Vendor session start raised: {}", err);
                return false;
            }
        };

        if reply.error_code() != Some(SUCCESS_CODE) {
            error!("Vendor session start failed: {:?}", reply);
            return false;
        }

        match client.is_connected().await {
            Ok(connected) => {
                info!("Vendor connection state: {}", connected);
                connected
            }
            Err(err) => {
                error!("Vendor connectivity check raised: {}", err);
                false
            }
        }
    }

    /// Connects if the last known state is disconnected.
    pub async fn ensure_connected(&self) -> bool {
        if self.is_connected() {
            return true;
        }
        self.connect().await
    }

    pub async fn fetch(&self, query: &Query) -> RawResult {
        self.fetch_as_of(query, Local::now().date_naive()).await
    }

    /// Like [`fetch`](Self::fetch) with an explicit "today" for defaulting
    /// open date ranges.
    pub async fn fetch_as_of(&self, query: &Query, today: NaiveDate) -> RawResult {
        let window = query.window(today);
        debug!(?window, backend = self.backend_name(), "Fetching");

        match &self.backend {
            Backend::Mock(mock) => match window {
                QueryWindow::Snapshot => mock.snapshot(query),
                QueryWindow::Historical { start, end } => mock.history(query, start, end),
            },
            Backend::Real(client) => {
                let codes = query.codes_param();
                let fields = query.fields_param();
                let result = match window {
                    QueryWindow::Snapshot => client.wss(&codes, &fields, "").await,
                    QueryWindow::Historical { start, end } => {
                        client
                            .wsd(
                                &codes,
                                &fields,
                                &start.format(DATE_FORMAT).to_string(),
                                &end.format(DATE_FORMAT).to_string(),
                                &query.frequency.as_option(),
                            )
                            .await
                    }
                };
                Self::settle(result)
            }
        }
    }

    /// Latest quotes. Uses the vendor quote call where supported and the
    /// snapshot retrieval otherwise.
    pub async fn realtime(&self, query: &Query) -> RawResult {
        match &self.backend {
            Backend::Real(client) if client.supports_quotes() => {
                let result = client.wsq(&query.codes_param(), &query.fields_param()).await;
                Self::settle(result)
            }
            Backend::Real(client) => {
                let result = client.wss(&query.codes_param(), &query.fields_param(), "").await;
                Self::settle(result)
            }
            Backend::Mock(mock) => mock.snapshot(query),
        }
    }

    fn settle(result: crate::error::Result<RawResult>) -> RawResult {
        result.unwrap_or_else(|err| {
            error!("Vendor call failed: {}", err);
            RawResult::internal_failure(err)
        })
    }
}
