//! Stand-in backend used when the vendor library cannot be loaded.

use chrono::NaiveDate;
use rand::Rng;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::domain::{Query, RawResult, DATE_FORMAT};

/// Range of generated historical values.
pub const HISTORY_MIN: f64 = 95.0;
pub const HISTORY_MAX: f64 = 105.0;

pub struct MockBackend {
    table: HashMap<&'static str, HashMap<&'static str, Value>>,
}

impl MockBackend {
    pub fn new() -> Self {
        let table = HashMap::from([
            (
                "000001.SZ",
                HashMap::from([
                    ("sec_name", json!("平安银行")),
                    ("close", json!(10.5)),
                    ("pe_ttm", json!(5.2)),
                ]),
            ),
            (
                "600519.SH",
                HashMap::from([
                    ("sec_name", json!("贵州茅台")),
                    ("close", json!(1800.0)),
                    ("pe_ttm", json!(35.5)),
                ]),
            ),
        ]);

        Self { table }
    }

    /// Fixed value for `code`/`field`, `0` when either is unknown.
    pub fn lookup(&self, code: &str, field: &str) -> Value {
        self.table
            .get(code)
            .and_then(|fields| fields.get(field))
            .cloned()
            .unwrap_or_else(|| json!(0))
    }

    /// One row per code, one column per field. A multi-code request gets
    /// one row for each code, in request order.
    pub fn snapshot(&self, query: &Query) -> RawResult {
        let rows: Vec<Vec<Value>> = query
            .codes
            .iter()
            .map(|code| {
                query
                    .fields
                    .iter()
                    .map(|field| self.lookup(code, field))
                    .collect()
            })
            .collect();

        RawResult::Success {
            data: Some(json!(rows)),
            fields: Some(query.fields.clone()),
            codes: Some(query.codes.clone()),
            times: None,
        }
    }

    /// One row per calendar day in `[start, end]` whatever the requested
    /// frequency, each field drawn uniformly from `[95, 105]`.
    pub fn history(&self, query: &Query, start: NaiveDate, end: NaiveDate) -> RawResult {
        let mut rng = rand::thread_rng();
        let mut times = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for day in start.iter_days().take_while(|day| *day <= end) {
            times.push(day.format(DATE_FORMAT).to_string());
            rows.push(
                query
                    .fields
                    .iter()
                    .map(|_| rng.gen_range(HISTORY_MIN..=HISTORY_MAX))
                    .collect(),
            );
        }

        RawResult::Success {
            data: Some(json!(rows)),
            fields: Some(query.fields.clone()),
            codes: Some(query.codes.clone()),
            times: Some(times),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}
