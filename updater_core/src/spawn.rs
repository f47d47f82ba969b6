//! Ways to start the relaunched application as a detached process.

use std::path::Path;
use std::process::{Command, Stdio};

use updater_traits::ProcessLauncher;

type SpawnResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Opens the path with the platform's default handler, the same as a
/// double-click in the file manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Program and leading arguments for the host platform. The target path
    /// is appended after them.
    pub fn command_line() -> (&'static str, &'static [&'static str]) {
        OPEN_COMMAND
    }
}

#[cfg(target_os = "macos")]
const OPEN_COMMAND: (&str, &[&str]) = ("open", &[]);
#[cfg(windows)]
const OPEN_COMMAND: (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
#[cfg(not(any(target_os = "macos", windows)))]
const OPEN_COMMAND: (&str, &[&str]) = ("xdg-open", &[]);

impl ProcessLauncher for SystemOpener {
    // The opener itself starts fine for a missing target, so check first.
    fn spawn(&self, path: &Path) -> SpawnResult {
        if !path.try_exists()? {
            return Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }
        let (program, leading) = Self::command_line();
        let mut cmd = Command::new(program);
        cmd.args(leading).arg(path);
        spawn_detached(cmd)
    }
}

/// Executes the path itself, with no arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectExec;

impl DirectExec {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for DirectExec {
    fn spawn(&self, path: &Path) -> SpawnResult {
        spawn_detached(Command::new(path))
    }
}

/// Which strategy the launcher uses to start the application.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LaunchMode {
    /// Platform default handler (`open`, `xdg-open`, `start`)
    #[default]
    Open,
    /// Run the path as an executable
    Exec,
}

impl LaunchMode {
    pub fn spawner(self) -> Box<dyn ProcessLauncher> {
        match self {
            LaunchMode::Open => Box::new(SystemOpener::new()),
            LaunchMode::Exec => Box::new(DirectExec::new()),
        }
    }
}

// The child handle is dropped without waiting; it keeps running after we exit.
fn spawn_detached(mut cmd: Command) -> SpawnResult {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }
    tracing::debug!(command = ?cmd, "spawning detached process");
    let child = cmd.spawn()?;
    tracing::debug!(pid = child.id(), "process started");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_command_matches_platform() {
        let (program, leading) = SystemOpener::command_line();
        if cfg!(target_os = "macos") {
            assert_eq!(program, "open");
            assert!(leading.is_empty());
        } else if cfg!(windows) {
            assert_eq!(program, "cmd");
            assert_eq!(leading, &["/C", "start", ""]);
        } else {
            assert_eq!(program, "xdg-open");
            assert!(leading.is_empty());
        }
    }

    #[test]
    fn exec_of_missing_path_fails() {
        let err = DirectExec::new()
            .spawn(Path::new("/definitely/not/here/app-binary"))
            .expect_err("spawn should fail");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn open_of_missing_path_fails_before_spawning() {
        let err = SystemOpener::new()
            .spawn(Path::new("/definitely/not/here/Demo.app"))
            .expect_err("missing target must be rejected");
        let io = err
            .downcast_ref::<std::io::Error>()
            .expect("io error");
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
        assert!(io.to_string().contains("/definitely/not/here/Demo.app"));
    }

    #[test]
    fn mode_spawner_exec_uses_direct_exec() {
        let spawner = LaunchMode::Exec.spawner();
        assert!(
            spawner
                .spawn(Path::new("/definitely/not/here/app-binary"))
                .is_err()
        );
    }

    #[test]
    fn default_mode_is_open() {
        assert_eq!(LaunchMode::default(), LaunchMode::Open);
    }
}
