//! # CLI Module
//!
//! Command definitions and the functions behind them.
//!
//! The command functions take plain arguments and a writer so they can be
//! driven from tests without spawning the binary.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dictserve_core::{invoke, AdapterError, Artifact, InferenceAdapter, LookupAdapter, APPLICATION_JSON};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::{ServeConfig, DEFAULT_HOST, DEFAULT_MODEL_DIR, DEFAULT_PORT};

// =============================================================================
// ERRORS
// =============================================================================

/// CLI-level error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Adapter pipeline error.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (reading input, binding, writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of command output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Exit code following sysexits.h where one fits.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Adapter(AdapterError::ArtifactIo { .. }) => 66, // EX_NOINPUT
            CliError::Adapter(_) => 65,                                // EX_DATAERR
            CliError::Config(_) => 78,                                 // EX_CONFIG
            CliError::Io(_) => 74,                                     // EX_IOERR
            CliError::Json(_) => 1,
        }
    }
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Key-value lookup model server.
#[derive(Debug, Parser)]
#[command(name = "dictserve", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve /ping and /invocations
    Serve {
        /// Directory containing model.txt
        #[arg(long, env = "SM_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
        model_dir: PathBuf,

        /// Bind host
        #[arg(long, env = "DICTSERVE_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Bind port
        #[arg(long, env = "SAGEMAKER_BIND_TO_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Run a single invocation and print the response
    Invoke {
        /// Directory containing model.txt
        #[arg(long, env = "SM_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
        model_dir: PathBuf,

        /// Request body file, or `-` for stdin
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Declared request content type
        #[arg(long, default_value = APPLICATION_JSON)]
        content_type: String,

        /// Requested response content type
        #[arg(long, default_value = APPLICATION_JSON)]
        accept: String,
    },

    /// Load the model and report what was found
    Check {
        /// Directory containing model.txt
        #[arg(long, env = "SM_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
        model_dir: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Load the model and serve until shutdown.
pub async fn cmd_serve(config: ServeConfig) -> Result<(), CliError> {
    config.validate()?;
    let addr = config.socket_addr()?;
    info!(model_dir = %config.model_dir.display(), %addr, "starting dictserve");

    let model = LookupAdapter.load_model(&config.model_dir)?;
    info!(entries = model.len(), "model loaded");

    let listener = TcpListener::bind(addr).await?;
    api::serve(listener, AppState::new(model)).await
}

/// Run one request through the pipeline and write the response to `out`.
///
/// `input` of `None` or `-` reads the body from stdin.
pub fn cmd_invoke(
    model_dir: &Path,
    input: Option<&Path>,
    content_type: &str,
    accept: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let model = LookupAdapter.load_model(model_dir)?;
    let body = read_input(input)?;

    let response = invoke(&LookupAdapter, &model, &body, content_type, accept)?;
    writeln!(out, "{response}")?;
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read(path)?),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Summary printed by `dictserve check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub path: PathBuf,
    pub entries: usize,
}

/// Load the artifact and describe it.
pub fn cmd_check(model_dir: &Path, json: bool, out: &mut impl Write) -> Result<CheckSummary, CliError> {
    let model = LookupAdapter.load_model(model_dir)?;
    let summary = CheckSummary {
        path: Artifact::path_in(model_dir),
        entries: model.len(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(out, "Model:   {}", summary.path.display())?;
        writeln!(out, "Entries: {}", summary.entries)?;
    }
    Ok(summary)
}
