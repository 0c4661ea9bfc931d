//! # dictserve-core
//!
//! The pure half of dictserve: a key-value "model" and the four-stage adapter
//! that serves it.
//!
//! - [`artifact`]: load `<model_dir>/model.txt` into an immutable map
//! - [`request`]: parse `{"data": <key>}` payloads
//! - [`predict`]: exact-match lookup with a fixed fallback
//! - [`response`]: JSON encoding of the prediction
//! - [`adapter`]: the [`InferenceAdapter`] trait and the [`invoke`] pipeline
//!
//! Nothing here performs network IO or spawns tasks.

pub mod adapter;
pub mod artifact;
pub mod content;
pub mod error;
pub mod predict;
pub mod request;
pub mod response;

pub use adapter::{invoke, InferenceAdapter, LookupAdapter};
pub use artifact::{Artifact, MODEL_FILE};
pub use content::APPLICATION_JSON;
pub use error::{AdapterError, AdapterResult};
pub use predict::{Prediction, FALLBACK_RESPONSE};
pub use request::LookupKey;
pub use response::SERIALIZATION_FALLBACK;
