//! Maps backend results onto the response envelope.

use serde_json::Value;

use crate::domain::{Envelope, NormalizedResponse, RawResult, SUCCESS_CODE};

/// Message carried by every successful envelope.
pub const SUCCESS_MESSAGE: &str = "success";

/// Converts a backend result into the canonical response.
///
/// Successful results copy through whichever of `data`, `fields`, `codes`
/// and `times` they carry; absent parts stay absent. Failures carry only the
/// rendered diagnostic. Results without an error code pass through untouched.
pub fn normalize(raw: RawResult) -> NormalizedResponse {
    match raw {
        RawResult::Passthrough(value) => NormalizedResponse::Passthrough(value),
        RawResult::Success {
            data,
            fields,
            codes,
            times,
        } => NormalizedResponse::Envelope(Envelope {
            error_code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
            data,
            fields,
            codes,
            times,
        }),
        RawResult::Failure { code, diagnostic } => {
            NormalizedResponse::Envelope(Envelope::error(code, render_diagnostic(&diagnostic)))
        }
    }
}

/// Strings render as their text, anything else as compact JSON.
pub fn render_diagnostic(diagnostic: &Value) -> String {
    match diagnostic {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_string_diagnostic() {
        assert_eq!(render_diagnostic(&json!("timeout")), "timeout");
    }

    #[test]
    fn test_render_structured_diagnostic() {
        assert_eq!(
            render_diagnostic(&json!(["CWSSService: invalid indicators"])),
            r#"["CWSSService: invalid indicators"]"#
        );
    }
}
