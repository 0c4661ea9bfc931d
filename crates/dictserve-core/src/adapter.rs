//! # Adapter Module
//!
//! The four-function contract expected by the hosting platform, and the
//! pipeline that runs it.
//!
//! ```text
//! load_model ──► Model (once, at startup)
//!
//! body + content type ──► parse_input ──► predict ──► format_output ──► body
//! ```

use crate::artifact::Artifact;
use crate::error::AdapterResult;
use crate::predict::{predict, Prediction};
use crate::request::{parse_request, LookupKey};
use crate::response::format_response;
use std::path::Path;

// =============================================================================
// ADAPTER TRAIT
// =============================================================================

/// The model-serving contract: load, parse, predict, format.
///
/// `predict` is infallible; every failure happens at the edges.
pub trait InferenceAdapter {
    /// The loaded model, shared read-only across invocations.
    type Model;
    /// The parsed request.
    type Input;
    /// The prediction prior to encoding.
    type Output;

    /// Load the model from its directory.
    fn load_model(&self, model_dir: &Path) -> AdapterResult<Self::Model>;

    /// Parse a raw request body given its declared content type.
    fn parse_input(&self, body: &[u8], content_type: &str) -> AdapterResult<Self::Input>;

    /// Run the model.
    fn predict(&self, input: Self::Input, model: &Self::Model) -> Self::Output;

    /// Encode the prediction for the requested content type.
    fn format_output(&self, output: &Self::Output, accept: &str) -> AdapterResult<String>;
}

/// Run one invocation through all request-time stages.
pub fn invoke<A: InferenceAdapter>(
    adapter: &A,
    model: &A::Model,
    body: &[u8],
    content_type: &str,
    accept: &str,
) -> AdapterResult<String> {
    let input = adapter.parse_input(body, content_type)?;
    let output = adapter.predict(input, model);
    adapter.format_output(&output, accept)
}

// =============================================================================
// LOOKUP ADAPTER
// =============================================================================

/// Dictionary-lookup implementation of [`InferenceAdapter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupAdapter;

impl InferenceAdapter for LookupAdapter {
    type Model = Artifact;
    type Input = LookupKey;
    type Output = Prediction;

    fn load_model(&self, model_dir: &Path) -> AdapterResult<Artifact> {
        Artifact::load(model_dir)
    }

    fn parse_input(&self, body: &[u8], content_type: &str) -> AdapterResult<LookupKey> {
        parse_request(body, content_type)
    }

    fn predict(&self, input: LookupKey, model: &Artifact) -> Prediction {
        let prediction = predict(input, model);
        tracing::debug!(fallback = prediction.is_fallback(), "lookup complete");
        prediction
    }

    fn format_output(&self, output: &Prediction, accept: &str) -> AdapterResult<String> {
        format_response(output, accept)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::artifact::MODEL_FILE;
    use crate::error::AdapterError;
    use serde_json::{json, Value};

    fn model() -> Artifact {
        [("a", "x")].into_iter().collect()
    }

    fn invoke_json(body: &[u8]) -> AdapterResult<Value> {
        let text = invoke(&LookupAdapter, &model(), body, "application/json", "application/json")?;
        Ok(serde_json::from_str(&text).unwrap())
    }

    #[test]
    fn known_key_round_trip() {
        let value = invoke_json(br#"{"data": "a"}"#).unwrap();
        assert_eq!(value, json!({"your_input": "a", "model_response": "x"}));
    }

    #[test]
    fn unknown_key_falls_back() {
        let value = invoke_json(br#"{"data": "z"}"#).unwrap();
        assert_eq!(
            value,
            json!({"your_input": "z", "model_response": "No response found"})
        );
    }

    #[test]
    fn missing_data_stops_the_pipeline() {
        assert!(matches!(
            invoke_json(b"{}"),
            Err(AdapterError::MissingData)
        ));
    }

    #[test]
    fn content_type_checked_before_accept() {
        let result = invoke(&LookupAdapter, &model(), b"{}", "text/plain", "text/csv");
        assert!(matches!(result, Err(AdapterError::UnsupportedContentType(_))));
    }

    #[test]
    fn bad_accept_after_valid_input() {
        let result = invoke(
            &LookupAdapter,
            &model(),
            br#"{"data": "a"}"#,
            "application/json",
            "text/csv",
        );
        assert!(matches!(result, Err(AdapterError::UnsupportedAccept(_))));
    }

    #[test]
    fn load_model_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILE), r#"{"k": "v"}"#).unwrap();

        let artifact = LookupAdapter.load_model(dir.path()).unwrap();
        assert_eq!(artifact.get("k"), Some("v"));
    }
}
