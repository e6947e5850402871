use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use wind_gateway_core::{
    CoreError, DataSource, Frequency, MarketDataClient, MockBackend, Query, RawResult,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Records the calls it receives and answers from canned replies.
#[derive(Default)]
struct StubClient {
    start_code: i64,
    connected: bool,
    fail_calls: bool,
    quotes: bool,
    calls: Mutex<Vec<String>>,
}

impl StubClient {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self) -> wind_gateway_core::Result<RawResult> {
        if self.fail_calls {
            return Err(CoreError::Backend("bridge unreachable".into()));
        }
        Ok(RawResult::Success {
            data: Some(json!([[1.0]])),
            fields: None,
            codes: None,
            times: None,
        })
    }
}

#[async_trait]
impl MarketDataClient for StubClient {
    async fn start(&self) -> wind_gateway_core::Result<RawResult> {
        self.record("start".into());
        if self.fail_calls {
            return Err(CoreError::Backend("bridge unreachable".into()));
        }
        Ok(RawResult::from_vendor(json!({"ErrorCode": self.start_code, "Data": []})))
    }

    async fn is_connected(&self) -> wind_gateway_core::Result<bool> {
        self.record("isconnected".into());
        Ok(self.connected)
    }

    async fn wss(&self, codes: &str, fields: &str, options: &str) -> wind_gateway_core::Result<RawResult> {
        self.record(format!("wss {} {} [{}]", codes, fields, options));
        self.reply()
    }

    async fn wsd(
        &self,
        codes: &str,
        fields: &str,
        begin: &str,
        end: &str,
        options: &str,
    ) -> wind_gateway_core::Result<RawResult> {
        self.record(format!("wsd {} {} {} {} [{}]", codes, fields, begin, end, options));
        self.reply()
    }

    async fn wsq(&self, codes: &str, fields: &str) -> wind_gateway_core::Result<RawResult> {
        self.record(format!("wsq {} {}", codes, fields));
        self.reply()
    }

    fn supports_quotes(&self) -> bool {
        self.quotes
    }
}

fn connected_stub() -> StubClient {
    StubClient {
        connected: true,
        ..Default::default()
    }
}

// ===== Backend Selection =====

#[test]
fn test_acquire_falls_back_to_mock() {
    let loaded: Result<Arc<dyn MarketDataClient>, String> = Err("library not found".into());
    let source = DataSource::acquire(loaded);

    assert!(!source.is_available());
    assert_eq!(source.backend_name(), "mock");
    assert!(!source.is_connected());
}

#[test]
fn test_acquire_uses_loaded_client() {
    let loaded: Result<Arc<dyn MarketDataClient>, String> = Ok(Arc::new(connected_stub()));
    let source = DataSource::acquire(loaded);

    assert!(source.is_available());
    assert_eq!(source.backend_name(), "vendor");
}

// ===== Connection =====

#[tokio::test]
async fn test_mock_connect_always_succeeds() {
    let source = DataSource::mock();

    assert!(source.connect().await);
    assert!(source.is_connected());
}

#[tokio::test]
async fn test_real_connect_requires_zero_code_and_connectivity() {
    let stub = Arc::new(connected_stub());
    let source = DataSource::real(stub.clone());

    assert!(source.connect().await);
    assert!(source.is_connected());
    assert_eq!(stub.calls(), strings(&["start", "isconnected"]));
}

#[tokio::test]
async fn test_real_connect_start_failure() {
    let stub = Arc::new(StubClient {
        start_code: -40520002,
        connected: true,
        ..Default::default()
    });
    let source = DataSource::real(stub.clone());

    assert!(!source.connect().await);
    assert!(!source.is_connected());
    assert_eq!(stub.calls(), strings(&["start"]));
}

#[tokio::test]
async fn test_real_connect_not_connected_after_start() {
    let source = DataSource::real(Arc::new(StubClient::default()));

    assert!(!source.connect().await);
    assert!(!source.is_connected());
}

#[tokio::test]
async fn test_real_connect_error_is_false() {
    let source = DataSource::real(Arc::new(StubClient {
        fail_calls: true,
        ..Default::default()
    }));

    assert!(!source.connect().await);
}

#[tokio::test]
async fn test_ensure_connected_skips_when_connected() {
    let stub = Arc::new(connected_stub());
    let source = DataSource::real(stub.clone());

    assert!(source.ensure_connected().await);
    assert!(source.ensure_connected().await);
    assert_eq!(stub.calls(), strings(&["start", "isconnected"]));
}

#[tokio::test]
async fn test_ensure_connected_retries_when_disconnected() {
    let stub = Arc::new(StubClient::default());
    let source = DataSource::real(stub.clone());

    assert!(!source.ensure_connected().await);
    assert!(!source.ensure_connected().await);
    assert_eq!(
        stub.calls(),
        strings(&["start", "isconnected", "start", "isconnected"])
    );
}

// ===== Real Backend Fetch =====

#[tokio::test]
async fn test_real_snapshot_calls_wss() {
    let stub = Arc::new(connected_stub());
    let source = DataSource::real(stub.clone());
    let query = Query::snapshot(strings(&["600519.SH", "000001.SZ"]), strings(&["close", "pe_ttm"]));

    let raw = source.fetch(&query).await;

    assert!(raw.is_success());
    assert_eq!(stub.calls(), strings(&["wss 600519.SH,000001.SZ close,pe_ttm []"]));
}

#[tokio::test]
async fn test_real_history_calls_wsd_with_period() {
    let stub = Arc::new(connected_stub());
    let source = DataSource::real(stub.clone());
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["close"]))
        .with_range(Some(date("2024-01-01")), None)
        .with_frequency(Frequency::W);

    source.fetch_as_of(&query, date("2024-02-01")).await;

    assert_eq!(
        stub.calls(),
        strings(&["wsd 600519.SH close 2024-01-01 2024-02-01 [Period=W]"])
    );
}

#[tokio::test]
async fn test_real_fetch_error_becomes_failure() {
    let source = DataSource::real(Arc::new(StubClient {
        fail_calls: true,
        ..Default::default()
    }));
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["close"]));

    let raw = source.fetch(&query).await;

    assert_eq!(
        raw,
        RawResult::failure(-1, Value::String("Backend error: bridge unreachable".into()))
    );
}

#[tokio::test]
async fn test_realtime_prefers_quotes() {
    let stub = Arc::new(StubClient {
        connected: true,
        quotes: true,
        ..Default::default()
    });
    let source = DataSource::real(stub.clone());
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["last", "volume"]));

    source.realtime(&query).await;

    assert_eq!(stub.calls(), strings(&["wsq 600519.SH last,volume"]));
}

#[tokio::test]
async fn test_realtime_without_quotes_uses_snapshot() {
    let stub = Arc::new(connected_stub());
    let source = DataSource::real(stub.clone());
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["last"]));

    source.realtime(&query).await;

    assert_eq!(stub.calls(), strings(&["wss 600519.SH last []"]));
}

// ===== Mock Backend =====

#[test]
fn test_mock_lookup_known_and_unknown() {
    let mock = MockBackend::new();

    assert_eq!(mock.lookup("000001.SZ", "sec_name"), json!("平安银行"));
    assert_eq!(mock.lookup("600519.SH", "close"), json!(1800.0));
    assert_eq!(mock.lookup("300750.SZ", "sec_name"), json!(0));
    assert_eq!(mock.lookup("000001.SZ", "volume"), json!(0));
}

#[tokio::test]
async fn test_mock_snapshot_single_row() {
    let source = DataSource::mock();
    let query = Query::snapshot(strings(&["000001.SZ"]), strings(&["sec_name", "close"]));

    let raw = source.fetch(&query).await;

    assert_eq!(
        raw,
        RawResult::Success {
            data: Some(json!([["平安银行", 10.5]])),
            fields: Some(strings(&["sec_name", "close"])),
            codes: Some(strings(&["000001.SZ"])),
            times: None,
        }
    );
}

#[tokio::test]
async fn test_mock_history_one_row_per_day_in_range() {
    let source = DataSource::mock();
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["close", "open"]))
        .with_range(Some(date("2024-01-01")), Some(date("2024-01-03")))
        .with_frequency(Frequency::M);

    let RawResult::Success { data, times, .. } = source.fetch(&query).await else {
        panic!("expected success");
    };

    assert_eq!(times, Some(strings(&["2024-01-01", "2024-01-02", "2024-01-03"])));

    let data = data.unwrap();
    let rows = data.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        let row = row.as_array().unwrap();
        assert_eq!(row.len(), 2);
        for value in row {
            let v = value.as_f64().unwrap();
            assert!((95.0..=105.0).contains(&v), "{} out of range", v);
        }
    }
}

#[tokio::test]
async fn test_mock_history_inverted_range_is_empty() {
    let source = DataSource::mock();
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["close"]))
        .with_range(Some(date("2024-01-05")), Some(date("2024-01-01")));

    let RawResult::Success { data, times, .. } = source.fetch(&query).await else {
        panic!("expected success");
    };

    assert_eq!(data, Some(json!([])));
    assert_eq!(times, Some(vec![]));
}

#[tokio::test]
async fn test_mock_history_open_start_spans_lookback() {
    let source = DataSource::mock();
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["close"]))
        .with_range(None, Some(date("2024-03-31")));

    let RawResult::Success { times, .. } = source.fetch_as_of(&query, date("2024-03-31")).await
    else {
        panic!("expected success");
    };

    let times = times.unwrap();
    assert_eq!(times.len(), 31);
    assert_eq!(times.first().map(String::as_str), Some("2024-03-01"));
    assert_eq!(times.last().map(String::as_str), Some("2024-03-31"));
}

#[tokio::test]
async fn test_mock_history_ends_on_last_representable_day() {
    let source = DataSource::mock();
    let last = NaiveDate::MAX;
    let query = Query::snapshot(strings(&["600519.SH"]), strings(&["close"]))
        .with_range(last.pred_opt(), Some(last));

    let RawResult::Success { data, times, .. } = source.fetch(&query).await else {
        panic!("expected success");
    };

    assert_eq!(times.map(|t| t.len()), Some(2));
    assert_eq!(data.unwrap().as_array().unwrap().len(), 2);
}
