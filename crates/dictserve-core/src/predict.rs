//! # Predict Module
//!
//! The "inference" step: a lookup against the artifact with a fixed fallback.

use crate::artifact::Artifact;
use crate::request::LookupKey;
use serde::Serialize;
use serde_json::Value;

/// Returned when the key is absent from the artifact.
pub const FALLBACK_RESPONSE: &str = "No response found";

/// Result of one lookup, serialized as the response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The `data` value exactly as received.
    pub your_input: Value,
    /// The looked-up value, or [`FALLBACK_RESPONSE`].
    pub model_response: String,
}

impl Prediction {
    /// True when the lookup fell back.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.model_response == FALLBACK_RESPONSE
    }
}

/// Look the key up. Total: never fails.
#[must_use]
pub fn predict(key: LookupKey, artifact: &Artifact) -> Prediction {
    let model_response = key
        .as_str()
        .and_then(|k| artifact.get(k))
        .unwrap_or(FALLBACK_RESPONSE)
        .to_string();

    Prediction {
        your_input: key.into_value(),
        model_response,
    }
}

// =============================================================================
// TESTS
// =============================================================================
