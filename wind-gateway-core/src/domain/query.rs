use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Date format used on the wire and by the vendor library.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days covered by a historical query that only names its end date.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Frequency {
    #[default]
    D,
    W,
    M,
}

impl Frequency {
    /// Vendor option string carrying the sampling period, e.g. `Period=W`.
    pub fn as_option(&self) -> String {
        format!("Period={}", self)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::D => "D",
            Frequency::W => "W",
            Frequency::M => "M",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D" => Ok(Frequency::D),
            "W" => Ok(Frequency::W),
            "M" => Ok(Frequency::M),
            other => Err(CoreError::Validation(format!(
                "unsupported frequency '{}', expected one of D, W, M",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Stock,
    Bond,
    Fund,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::Stock => "stock",
            DataType::Bond => "bond",
            DataType::Fund => "fund",
        };
        f.write_str(s)
    }
}

impl FromStr for DataType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stock" => Ok(DataType::Stock),
            "bond" => Ok(DataType::Bond),
            "fund" => Ok(DataType::Fund),
            other => Err(CoreError::Validation(format!(
                "unsupported data type '{}', expected one of stock, bond, fund",
                other
            ))),
        }
    }
}

/// Resolved retrieval mode of a [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryWindow {
    /// Latest values only.
    Snapshot,
    /// Inclusive date range.
    Historical { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub codes: Vec<String>,
    pub fields: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub frequency: Frequency,
    pub data_type: DataType,
}

impl Query {
    /// Snapshot query over the given codes and fields.
    pub fn snapshot(codes: Vec<String>, fields: Vec<String>) -> Self {
        Self {
            codes,
            fields,
            start_date: None,
            end_date: None,
            frequency: Frequency::default(),
            data_type: DataType::default(),
        }
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn is_snapshot(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Resolves the retrieval window relative to `today`. A missing start
    /// defaults to `today - 30 days`, a missing end to `today`.
    pub fn window(&self, today: NaiveDate) -> QueryWindow {
        if self.is_snapshot() {
            return QueryWindow::Snapshot;
        }

        let start = self
            .start_date
            .unwrap_or_else(|| today - Duration::days(DEFAULT_LOOKBACK_DAYS));
        let end = self.end_date.unwrap_or(today);

        QueryWindow::Historical { start, end }
    }

    /// Codes joined the way the vendor expects them.
    pub fn codes_param(&self) -> String {
        self.codes.join(",")
    }

    pub fn fields_param(&self) -> String {
        self.fields.join(",")
    }
}

/// Splits a comma-joined transport list, trimming entries and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses an optional transport date. Blank strings count as absent.
pub fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|e| CoreError::Validation(format!("invalid date '{}': {}", s, e))),
    }
}
