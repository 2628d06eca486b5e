use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use release_gate::cli::{self, orchestration, Invocation};
use release_gate::{config, ui};

/// Logs go to stderr; stdout carries the progress lines.
fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("release_gate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("release_gate=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let (command, config_path, verbose) = match cli::parse_args(std::env::args_os()) {
        Invocation::Run {
            command,
            config,
            verbose,
        } => (command, config, verbose),
        Invocation::Usage => {
            ui::display_usage("release");
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Info(info) => {
            info.print()?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    init_tracing(verbose)?;

    let config = match config::load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    match orchestration::run_workflow(&command, &config) {
        Ok(report) => {
            tracing::info!(passed = report.passed.len(), "release command finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), "release command failed");
            ui::display_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}
