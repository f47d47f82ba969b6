mod cli;
mod error_fmt;

use eyre::{Result, WrapErr};
use std::process::ExitCode;
use updater_core::{LaunchMode, Launcher, SessionLogger};
use updater_traits::MonotonicClock;

use crate::cli::{Cli, RestartRequest, USAGE};

fn main() -> ExitCode {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) if cli::is_missing_path_value(&e) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };
    init_tracing(&cli.log_level, cli.json);
    if let Err(e) = color_eyre::install() {
        tracing::debug!(error = %e, "color-eyre hooks not installed");
    }

    // Nothing touches the filesystem until both paths are known.
    let request = match cli.restart_request() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{USAGE}");
            report_details(&eyre::Report::new(e));
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_fmt::fatal_line(&err));
            report_details(&err);
            ExitCode::FAILURE
        }
    }
}

/// Fix hints plus the full color-eyre report, visible at debug level.
fn report_details(err: &eyre::Report) {
    tracing::debug!("{}", error_fmt::humanize(err));
    tracing::debug!("{err:?}");
}

fn run(cli: &Cli, request: &RestartRequest) -> Result<()> {
    let mut logger =
        SessionLogger::init(&request.log_path).wrap_err("Failed to initialize logger")?;

    let launcher = Launcher::with_parts(
        LaunchMode::from(cli.launch_mode).spawner(),
        MonotonicClock::new(),
    )
    .with_delay(cli.delay());

    // On the error path the logger is dropped on return, which writes the end marker.
    if let Err(err) = launcher.restart_app(&request.app_path, &mut logger) {
        logger.error(&format!("Failed to restart app: {err:#}"));
        return Err(err.wrap_err("Failed to restart app"));
    }

    if let Err(e) = logger.close() {
        tracing::warn!(error = %e, "failed to close session log");
    }
    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let res = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = res {
        eprintln!("tracing init failed: {e}");
    }
}
