//! # API Module
//!
//! The container's HTTP contract:
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/ping` | health check, 200 once the model is loaded |
//! | POST | `/invocations` | one pass through the adapter pipeline |
//!
//! The model is loaded before the router exists, so `/ping` has nothing to
//! wait on.

mod error;

pub use error::{ErrorBody, HttpError};

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use dictserve_core::{invoke, Artifact, LookupAdapter, APPLICATION_JSON};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::cli::CliError;
use crate::config::MAX_BODY_BYTES;

// =============================================================================
// STATE
// =============================================================================

/// Shared state: the read-only model plus the adapter that serves it.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<Artifact>,
    pub adapter: LookupAdapter,
}

impl AppState {
    /// Wrap a loaded artifact.
    #[must_use]
    pub fn new(model: Artifact) -> Self {
        Self {
            model: Arc::new(model),
            adapter: LookupAdapter,
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the router with tracing and the payload cap applied.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/invocations", post(invocations))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

fn header_str<'a>(headers: &'a HeaderMap, name: axum::http::HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn ping() -> StatusCode {
    StatusCode::OK
}

async fn invocations(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, HttpError> {
    let content_type = header_str(&headers, CONTENT_TYPE);
    let accept = header_str(&headers, ACCEPT);
    debug!(content_type, accept, bytes = body.len(), "POST /invocations");

    let output = invoke(&state.adapter, &state.model, &body, content_type, accept)?;
    Ok(([(CONTENT_TYPE, APPLICATION_JSON)], output).into_response())
}

// =============================================================================
// SERVER
// =============================================================================

/// Serve on an already-bound listener until Ctrl-C or SIGTERM.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), CliError> {
    let addr = listener.local_addr()?;
    info!(%addr, entries = state.model.len(), "dictserve listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("dictserve shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl-C"),
        () = terminate => info!("received SIGTERM"),
    }
}
