use std::path::Path;
use std::process::Command;
use std::time::Duration;

use super::process::{describe, run_with_timeout};

/// Default validation command; the written file path is appended.
pub const DEFAULT_HOOK_COMMAND: &[&str] = &["pre-commit", "run", "--files"];

/// Runs after every write. Its result never changes the publish outcome.
pub trait ValidationHook {
    fn run(&self, path: &Path);
}

/// Runs an external command with the written path as its last argument.
#[derive(Debug, Clone)]
pub struct CommandHook {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandHook {
    /// Build from an argv list. Returns `None` for an empty list.
    pub fn from_argv<S: AsRef<str>>(argv: &[S], timeout: Duration) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.as_ref().to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            timeout,
        })
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(path);
        command
    }
}

impl ValidationHook for CommandHook {
    fn run(&self, path: &Path) {
        let command = self.command(path);
        let shown = describe(&command);
        log::debug!("running {shown}");

        match run_with_timeout(command, self.timeout) {
            Ok(output) if output.status.success() => log::debug!("{shown} passed"),
            // pre-commit exits non-zero when its fixers touched the file.
            Ok(output) => log::debug!("{shown} exited with {}", output.status),
            Err(e) => log::warn!("failed to run {shown}: {e}"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl ValidationHook for NoopHook {
    fn run(&self, _path: &Path) {}
}
