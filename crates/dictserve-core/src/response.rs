//! # Response Module
//!
//! Serialization of predictions into the response body.
//!
//! With a JSON accept type this never fails: if encoding the value fails the
//! caller receives [`SERIALIZATION_FALLBACK`] instead, and the encode error is
//! logged.

use crate::content::negotiate_accept;
use crate::error::AdapterResult;
use serde::Serialize;

/// Body returned when the prediction cannot be encoded.
pub const SERIALIZATION_FALLBACK: &str =
    r#"{"authorized":false,"error":"Failed to serialize response"}"#;

/// Encode `prediction` as JSON for the requested accept type.
pub fn format_response<T: Serialize>(prediction: &T, accept: &str) -> AdapterResult<String> {
    negotiate_accept(accept)?;

    match serde_json::to_string(prediction) {
        Ok(body) => Ok(body),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize prediction, returning fallback body");
            Ok(SERIALIZATION_FALLBACK.to_string())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::predict::Prediction;
    use serde::Serializer;
    use serde_json::{json, Value};

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to encode"))
        }
    }

    #[test]
    fn prediction_is_encoded_with_field_names() {
        let prediction = Prediction {
            your_input: json!("a"),
            model_response: "x".to_string(),
        };
        let body = format_response(&prediction, "application/json").unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value, json!({"your_input": "a", "model_response": "x"}));
    }

    #[test]
    fn input_field_precedes_response_field() {
        let prediction = Prediction {
            your_input: json!("a"),
            model_response: "x".to_string(),
        };
        let body = format_response(&prediction, "application/json").unwrap();
        assert_eq!(body, r#"{"your_input":"a","model_response":"x"}"#);
    }

    #[test]
    fn unsupported_accept_is_rejected() {
        let prediction = Prediction {
            your_input: json!("a"),
            model_response: "x".to_string(),
        };
        assert!(matches!(
            format_response(&prediction, "text/csv"),
            Err(AdapterError::UnsupportedAccept(_))
        ));
    }

    #[test]
    fn encode_failure_yields_fallback_body() {
        let body = format_response(&Unencodable, "application/json").unwrap();
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({"authorized": false, "error": "Failed to serialize response"})
        );
    }

    #[test]
    fn unsupported_accept_wins_over_encode_failure() {
        assert!(format_response(&Unencodable, "text/plain").is_err());
    }
}
