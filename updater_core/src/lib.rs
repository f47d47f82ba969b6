#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Relaunch logic for the updater helper.
//!
//! - `logger`: append-only session log with start/end markers
//! - `launcher`: delayed, detached relaunch through a `ProcessLauncher`
//! - `spawn`: platform strategies for starting the app
//!
//! OS interaction goes through `updater_traits::ProcessLauncher` and
//! `updater_traits::Clock`, so everything here can be driven by `mocks`.

pub mod error;
pub mod launcher;
pub mod logger;
pub mod mocks;
pub mod spawn;

pub use error::{Result, UpdaterError};
pub use launcher::{Launcher, RESTART_DELAY};
pub use logger::{LogLevel, SessionLogger};
pub use spawn::{DirectExec, LaunchMode, SystemOpener};
