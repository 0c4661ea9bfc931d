//! HTTP mapping for adapter errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dictserve_core::AdapterError;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

/// Adapter error wrapped for axum.
#[derive(Debug)]
pub struct HttpError(pub AdapterError);

impl HttpError {
    /// Status code for the wrapped error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AdapterError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AdapterError::UnsupportedAccept(_) => StatusCode::NOT_ACCEPTABLE,
            AdapterError::InvalidEncoding(_)
            | AdapterError::InvalidJson(_)
            | AdapterError::MissingData
            | AdapterError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            AdapterError::ArtifactIo { .. } | AdapterError::ArtifactDecode { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AdapterError> for HttpError {
    fn from(err: AdapterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "invocation rejected");
        } else {
            tracing::error!(status = status.as_u16(), error = %self.0, "invocation failed");
        }

        let body = ErrorBody {
            error: self.0.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
