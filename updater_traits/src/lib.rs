pub mod clock;

pub use clock::{Clock, MonotonicClock};

use std::path::Path;

/// Starts an application at `path` as a new, detached OS process.
///
/// Implementations must return as soon as the process has been created and
/// must not wait for it to exit.
pub trait ProcessLauncher {
    fn spawn(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for Box<T> {
    fn spawn(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).spawn(path)
    }
}

impl<T: ProcessLauncher + ?Sized> ProcessLauncher for &T {
    fn spawn(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        (**self).spawn(path)
    }
}
