use async_trait::async_trait;

use crate::domain::RawResult;
use crate::error::Result;

/// Calls exposed by the vendor market-data library.
///
/// `codes` and `fields` are comma-joined, dates are `YYYY-MM-DD` and
/// `options` is the vendor option string (e.g. `Period=D`). An `Err` means
/// the call never produced a vendor result; vendor-side failures come back
/// as `Ok(RawResult::Failure { .. })`.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Starts a vendor session.
    async fn start(&self) -> Result<RawResult>;

    async fn is_connected(&self) -> Result<bool>;

    /// Cross-section retrieval: latest values of `fields` for `codes`.
    async fn wss(&self, codes: &str, fields: &str, options: &str) -> Result<RawResult>;

    /// Time-series retrieval over `[begin, end]`.
    async fn wsd(
        &self,
        codes: &str,
        fields: &str,
        begin: &str,
        end: &str,
        options: &str,
    ) -> Result<RawResult>;

    /// Quote snapshot. Only meaningful when [`supports_quotes`](Self::supports_quotes) is true.
    async fn wsq(&self, codes: &str, fields: &str) -> Result<RawResult>;

    fn supports_quotes(&self) -> bool {
        false
    }
}
