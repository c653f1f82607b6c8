use crate::error::{GfillError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub const GIT: &str = "git";

/// One git invocation: its arguments plus environment set on the child only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl GitCommand {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { args: args.into_iter().map(Into::into).collect(), env: Vec::new() }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn display(&self) -> String {
        format!("{GIT} {}", self.args.join(" "))
    }
}

pub trait CommandRunner {
    /// Runs the command in `cwd` and fails unless it exits successfully.
    fn run(&self, cwd: &Path, command: &GitCommand) -> Result<()>;

    /// Runs the command in `cwd`; any failure is logged and swallowed.
    fn run_ignoring_failure(&self, cwd: &Path, command: &GitCommand) {
        if let Err(e) = self.run(cwd, command) {
            debug!(command = %command.display(), error = %e, "ignoring failed command");
        }
    }
}

/// Blocking runner backed by the `git` executable on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, cwd: &Path, command: &GitCommand) -> Result<()> {
        debug!(cwd = %cwd.display(), command = %command.display(), "running");

        let output = Command::new(GIT)
            .args(&command.args)
            .envs(command.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(cwd)
            .output()
            .map_err(|source| GfillError::Spawn { command: command.display(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let details = if stderr.is_empty() { output.status.to_string() } else { stderr };
            debug!(command = %command.display(), %details, "command failed");
            return Err(GfillError::CommandFailed { command: command.display(), details });
        }

        Ok(())
    }
}
