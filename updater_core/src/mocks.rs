//! Test doubles for the launcher's capabilities.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use updater_traits::{Clock, ProcessLauncher};

/// Clock whose time only moves when `sleep` or `advance` is called.
///
/// Clones share the same timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn advance(&self, d: Duration) {
        if let Ok(mut off) = self.offset.lock() {
            *off = off.saturating_add(d);
        }
    }

    /// Time elapsed on this clock since it was created.
    pub fn elapsed(&self) -> Duration {
        self.offset.lock().map(|g| *g).unwrap_or(Duration::ZERO)
    }

    /// Every duration passed to `sleep`, in call order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, d: Duration) {
        if let Ok(mut s) = self.sleeps.lock() {
            s.push(d);
        }
        self.advance(d);
    }
}

/// Records spawn requests instead of starting processes.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    clock: Option<ManualClock>,
    spawned: RefCell<Vec<(PathBuf, Duration)>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp each spawn with the elapsed time of `clock`.
    pub fn with_clock(clock: ManualClock) -> Self {
        Self {
            clock: Some(clock),
            spawned: RefCell::new(Vec::new()),
        }
    }

    pub fn spawned(&self) -> Vec<PathBuf> {
        self.spawned.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Clock offsets at which each spawn happened (zero without a clock).
    pub fn spawned_at(&self) -> Vec<Duration> {
        self.spawned.borrow().iter().map(|(_, t)| *t).collect()
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn spawn(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let at = self
            .clock
            .as_ref()
            .map_or(Duration::ZERO, ManualClock::elapsed);
        self.spawned.borrow_mut().push((path.to_path_buf(), at));
        Ok(())
    }
}

/// Always fails to spawn, like a path that does not exist.
#[derive(Debug, Clone)]
pub struct FailingLauncher {
    message: String,
}

impl FailingLauncher {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ProcessLauncher for FailingLauncher {
    fn spawn(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            self.message.clone(),
        )))
    }
}
