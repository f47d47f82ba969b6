//! CLI argument definitions.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use updater_core::{LaunchMode, RESTART_DELAY, UpdaterError};

pub const USAGE: &str = "Usage: updater -app /path/to/app.app -log /path/to/log.txt";

const DEFAULT_DELAY_MS: u64 = RESTART_DELAY.as_millis() as u64;

/// Long flags that take a separate value.
const VALUE_FLAGS: &[&str] = &["app", "log", "delay-ms", "launch-mode", "log-level"];
/// Long flags without a value.
const SWITCH_FLAGS: &[&str] = &["json", "help", "version"];

#[derive(Parser, Debug)]
#[command(
    name = "updater",
    version,
    about = "Relaunch an application after it has installed an update"
)]
pub struct Cli {
    /// Current app path to restart
    #[arg(long, value_name = "PATH")]
    pub app: Option<OsString>,

    /// Log file path
    #[arg(long, value_name = "PATH")]
    pub log: Option<OsString>,

    /// Wait this long before relaunching, so the caller can exit first
    #[arg(long = "delay-ms", value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// How to start the app: platform default handler or direct exec
    #[arg(
        long = "launch-mode",
        value_enum,
        value_name = "MODE",
        default_value_t = LaunchModeArg::Open
    )]
    pub launch_mode: LaunchModeArg,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Console diagnostics as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LaunchModeArg {
    /// open / xdg-open / start
    Open,
    /// Execute the path directly
    Exec,
}

impl From<LaunchModeArg> for LaunchMode {
    fn from(m: LaunchModeArg) -> Self {
        match m {
            LaunchModeArg::Open => LaunchMode::Open,
            LaunchModeArg::Exec => LaunchMode::Exec,
        }
    }
}

/// Validated paths for one restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartRequest {
    pub app_path: PathBuf,
    pub log_path: PathBuf,
}

impl Cli {
    /// Both paths must be present and non-empty.
    pub fn restart_request(&self) -> Result<RestartRequest, UpdaterError> {
        let app_path = non_empty(self.app.as_ref())
            .ok_or_else(|| UpdaterError::Config("-app is required".to_string()))?;
        let log_path = non_empty(self.log.as_ref())
            .ok_or_else(|| UpdaterError::Config("-log is required".to_string()))?;
        Ok(RestartRequest { app_path, log_path })
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

// clap's PathBuf parser rejects "", which must reach us to print the usage line.
fn non_empty(p: Option<&OsString>) -> Option<PathBuf> {
    p.filter(|p| !p.is_empty()).map(PathBuf::from)
}

/// Normalize and parse the process arguments.
pub fn parse_args<I>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    Cli::try_parse_from(normalize_args(args))
}

/// True when clap rejected `-app`/`-log` for lacking a value (e.g. a trailing
/// `-app`). Those get the same usage line as an omitted path.
pub fn is_missing_path_value(err: &clap::Error) -> bool {
    if !matches!(
        err.kind(),
        ErrorKind::InvalidValue | ErrorKind::MissingRequiredArgument
    ) {
        return false;
    }
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => {
            matches!(arg.split_whitespace().next(), Some("--app" | "--log"))
        }
        _ => false,
    }
}

/// Rewrite single-dash long flags (`-app x`, `-log=y`) to clap's `--` form.
///
/// The first element (program name), values following a value flag, and
/// everything after `--` pass through untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut iter = args.into_iter();
    if let Some(program) = iter.next() {
        out.push(program);
    }
    let mut expecting_value = false;
    let mut passthrough = false;
    for arg in iter {
        if passthrough || expecting_value {
            expecting_value = false;
            out.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if s == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let name = s
            .strip_prefix("--")
            .or_else(|| s.strip_prefix('-'))
            .map(|rest| rest.split_once('=').map_or(rest, |(n, _)| n));
        match name {
            Some(n) if VALUE_FLAGS.contains(&n) => {
                expecting_value = !s.contains('=');
                out.push(OsString::from(format!("--{}", s.trim_start_matches('-'))));
            }
            Some(n) if SWITCH_FLAGS.contains(&n) => {
                out.push(OsString::from(format!("--{}", s.trim_start_matches('-'))));
            }
            _ => out.push(arg),
        }
    }
    out
}
