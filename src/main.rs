//! Diffexport CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use diffexport::{DiffExportConfig, ExportError, OperationMode};
use ortho_config::OrthoConfig;

mod cli;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ExportError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::ListFormats => cli::list_formats::run(),
        OperationMode::Print => cli::print::run(&config),
        OperationMode::Download => cli::download::run(&config),
        OperationMode::Preview => cli::preview::run(&config),
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DiffExportConfig, ExportError> {
    DiffExportConfig::load().map_err(|error| ExportError::Configuration {
        message: error.to_string(),
    })
}

/// Sends diagnostics to stderr, filtered by `RUST_LOG` (warnings by default).
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ignored = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}
