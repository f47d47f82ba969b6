//! Delayed relaunch of the application that invoked the updater.

use std::path::Path;
use std::time::Duration;

use updater_traits::{Clock, MonotonicClock, ProcessLauncher};

use crate::error::{Result, UpdaterError};
use crate::logger::SessionLogger;
use crate::spawn::SystemOpener;

/// How long to wait before spawning, so the calling app has fully exited and
/// released its file locks and single-instance guard.
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

/// Relaunches an application after a fixed delay.
///
/// Holds only immutable capabilities; one value can serve any number of calls.
#[derive(Debug, Clone)]
pub struct Launcher<S = SystemOpener, C = MonotonicClock> {
    spawner: S,
    clock: C,
    delay: Duration,
}

impl Launcher {
    /// Platform default handler, wall clock, and [`RESTART_DELAY`].
    pub fn new() -> Self {
        Self::with_parts(SystemOpener::new(), MonotonicClock::new())
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ProcessLauncher, C: Clock> Launcher<S, C> {
    pub fn with_parts(spawner: S, clock: C) -> Self {
        Self {
            spawner,
            clock,
            delay: RESTART_DELAY,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the delay, then start `app_path` as a detached process.
    ///
    /// A spawn failure is returned as [`UpdaterError::Launch`]; nothing is
    /// retried and no success line is logged.
    pub fn restart_app(&self, app_path: &Path, logger: &mut SessionLogger) -> Result<()> {
        logger.info(&format!(
            "Step 0: Basic restart - Starting app: {}",
            app_path.display()
        ));
        tracing::info!(
            app = %app_path.display(),
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "waiting before relaunch"
        );

        self.clock.sleep(self.delay);

        self.spawner
            .spawn(app_path)
            .map_err(|e| UpdaterError::Launch(format!("failed to start app: {e}")))?;

        logger.info("App restarted successfully!");
        tracing::info!(app = %app_path.display(), "app relaunched");
        Ok(())
    }
}
