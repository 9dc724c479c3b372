use std::path::Path;
use std::process::Command;
use std::time::Duration;

use super::process::{describe, run_with_timeout};

/// Short-status prefix git uses for untracked files.
pub const UNTRACKED_PREFIX: &str = "??";

/// Answers whether a published file is known to version control.
pub trait VersionControl {
    /// `true` when `path` exists on disk but is not tracked. Failures to
    /// query are reported as tracked.
    fn is_untracked(&self, path: &Path) -> bool;
}

/// Queries `git status --short` for the file.
#[derive(Debug, Clone)]
pub struct GitStatus {
    timeout: Duration,
}

impl GitStatus {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for GitStatus {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}

impl VersionControl for GitStatus {
    fn is_untracked(&self, path: &Path) -> bool {
        let mut command = Command::new("git");
        command.args(["status", "--short"]).arg(path);
        let shown = describe(&command);
        log::debug!("running {shown}");

        match run_with_timeout(command, self.timeout) {
            Ok(output) if output.status.success() => {
                is_untracked_status(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                log::warn!(
                    "{shown} exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                log::warn!("failed to run {shown}: {e}");
                false
            }
        }
    }
}

/// Version control disabled: every file counts as tracked.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeTracked;

impl VersionControl for AssumeTracked {
    fn is_untracked(&self, _path: &Path) -> bool {
        false
    }
}

/// Interpret `git status --short` output for a single file.
pub fn is_untracked_status(stdout: &str) -> bool {
    stdout.starts_with(UNTRACKED_PREFIX)
}
