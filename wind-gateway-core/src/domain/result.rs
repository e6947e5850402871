use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code reported by the vendor for a successful call.
pub const SUCCESS_CODE: i64 = 0;

/// Error code used for failures raised on this side of the vendor boundary.
pub const INTERNAL_FAILURE_CODE: i64 = -1;

/// What a backend call produced, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    Success {
        data: Option<Value>,
        fields: Option<Vec<String>>,
        codes: Option<Vec<String>>,
        times: Option<Vec<String>>,
    },
    Failure {
        code: i64,
        diagnostic: Value,
    },
    /// A reply that carried no error code at all.
    Passthrough(Value),
}

impl RawResult {
    pub fn failure(code: i64, diagnostic: impl Into<Value>) -> Self {
        RawResult::Failure {
            code,
            diagnostic: diagnostic.into(),
        }
    }

    /// Failure raised locally, e.g. a transport error talking to the vendor.
    pub fn internal_failure(err: impl std::fmt::Display) -> Self {
        Self::failure(INTERNAL_FAILURE_CODE, err.to_string())
    }

    pub fn error_code(&self) -> Option<i64> {
        match self {
            RawResult::Success { .. } => Some(SUCCESS_CODE),
            RawResult::Failure { code, .. } => Some(*code),
            RawResult::Passthrough(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RawResult::Success { .. })
    }

    /// Reads the vendor's result object (`ErrorCode`, `Data`, `Fields`,
    /// `Codes`, `Times`). Anything without an integer `ErrorCode` is kept
    /// as a passthrough value.
    pub fn from_vendor(value: Value) -> Self {
        let mut obj = match value {
            Value::Object(obj) => obj,
            other => return RawResult::Passthrough(other),
        };

        let code = match obj.get("ErrorCode").and_then(Value::as_i64) {
            Some(code) => code,
            None => return RawResult::Passthrough(Value::Object(obj)),
        };

        if code != SUCCESS_CODE {
            return RawResult::Failure {
                code,
                diagnostic: obj.remove("Data").unwrap_or(Value::Null),
            };
        }

        RawResult::Success {
            data: obj.remove("Data"),
            fields: take_strings(&mut obj, "Fields"),
            codes: take_strings(&mut obj, "Codes"),
            times: take_strings(&mut obj, "Times"),
        }
    }
}

fn take_strings(obj: &mut serde_json::Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = obj.remove(key)?;
    let items = items.as_array()?;
    Some(
        items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Canonical response body of every data-bearing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub error_code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<String>>,
}

impl Envelope {
    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Self {
            error_code: code,
            message: message.into(),
            data: None,
            fields: None,
            codes: None,
            times: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum NormalizedResponse {
    Envelope(Envelope),
    Passthrough(Value),
}

impl NormalizedResponse {
    pub fn error_code(&self) -> Option<i64> {
        match self {
            NormalizedResponse::Envelope(envelope) => Some(envelope.error_code),
            NormalizedResponse::Passthrough(value) => {
                value.get("errorCode").and_then(Value::as_i64)
            }
        }
    }

    pub fn as_envelope(&self) -> Option<&Envelope> {
        match self {
            NormalizedResponse::Envelope(envelope) => Some(envelope),
            NormalizedResponse::Passthrough(_) => None,
        }
    }
}
