//! Human-readable error descriptions for the fatal path.

/// The single line printed to stderr before exiting, with the cause chain.
pub fn fatal_line(err: &eyre::Report) -> String {
    format!("{err:#}")
}

/// Map an eyre::Report to an explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use updater_core::UpdaterError;

    if let Some(ue) = err.downcast_ref::<UpdaterError>() {
        return match ue {
            UpdaterError::Config(msg) => format!(
                "What happened: Missing argument ({msg}).\nLikely causes: The calling app did not pass both paths.\nHow to fix: Invoke as `updater -app <path> -log <path>`."
            ),
            UpdaterError::Io(msg) => format!(
                "What happened: The session log could not be opened ({msg}).\nLikely causes: No write permission on the log directory, or -log points at a directory.\nHow to fix: Pass a writable file path to -log."
            ),
            UpdaterError::Launch(msg) => format!(
                "What happened: The application could not be started ({msg}).\nLikely causes: The -app path does not exist, is not executable, or no default handler (open/xdg-open) is installed.\nHow to fix: Check the path, or switch strategy with --launch-mode open|exec."
            ),
        };
    }

    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {err}"
    )
}
