//! dictserve entry point.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dictserve::cli::{cmd_check, cmd_invoke, cmd_serve, Cli, CliError, Command};
use dictserve::config::ServeConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so `invoke` and `check` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve { model_dir, host, port } => {
            cmd_serve(ServeConfig { model_dir, host, port }).await
        }
        Command::Invoke {
            model_dir,
            input,
            content_type,
            accept,
        } => cmd_invoke(
            &model_dir,
            input.as_deref(),
            &content_type,
            &accept,
            &mut io::stdout().lock(),
        ),
        Command::Check { model_dir, json } => {
            cmd_check(&model_dir, json, &mut io::stdout().lock()).map(|_| ())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "dictserve failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
