use super::runner::{CommandRunner, GitCommand};
use crate::config::TRACKED_FILE;
use crate::error::{GfillError, Result};
use crate::model::Event;
use crate::util::day_stamp;
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PRIMARY_BRANCH: &str = "main";
pub const REMOTE_NAME: &str = "origin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    Initialized,
    Reused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Ready,
    AllEventsCommitted,
    Published,
}

/// The working repository plus the tracked file every event appends to.
pub struct ContributionRepo<'r, R: CommandRunner + ?Sized> {
    path: PathBuf,
    runner: &'r R,
    state: RepoState,
    commits: usize,
}

impl<'r, R: CommandRunner + ?Sized> ContributionRepo<'r, R> {
    /// Create and `git init` the directory if missing, otherwise reuse it as-is.
    pub fn ensure<P: AsRef<Path>>(path: P, runner: &'r R) -> Result<(Self, Ensured)> {
        let path = path.as_ref().to_path_buf();
        let ensured = if path.exists() {
            debug!(path = %path.display(), "reusing existing directory");
            Ensured::Reused
        } else {
            fs::create_dir_all(&path)?;
            runner.run(&path, &GitCommand::new(["init", "-b", PRIMARY_BRANCH]))?;
            info!(path = %path.display(), "initialized repository");
            Ensured::Initialized
        };

        Ok((Self { path, runner, state: RepoState::Ready, commits: 0 }, ensured))
    }

    pub fn tracked_file(&self) -> PathBuf {
        self.path.join(TRACKED_FILE)
    }

    pub fn state(&self) -> RepoState {
        self.state
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn configure_identity(&self, name: Option<&str>, email: Option<&str>) -> Result<()> {
        if let Some(name) = name {
            self.git(GitCommand::new(["config", "user.name", name]))?;
        }
        if let Some(email) = email {
            self.git(GitCommand::new(["config", "user.email", email]))?;
        }
        Ok(())
    }

    /// Append the event's line, stage everything and commit at the event's instant.
    pub fn realize(&mut self, event: &Event) -> Result<()> {
        self.expect_state(RepoState::Ready, "realize an event")?;

        let message = event.message();
        let date = event.commit_date();
        self.append_line(&message)?;
        self.git(GitCommand::new(["add", "."]))?;
        self.git(
            GitCommand::new(["commit", "-m", message.as_str(), "--date", date.as_str()])
                .env("GIT_COMMITTER_DATE", date.as_str()),
        )?;
        self.commits += 1;
        Ok(())
    }

    pub fn finish_events(&mut self) -> Result<()> {
        self.expect_state(RepoState::Ready, "finish events")?;
        self.state = RepoState::AllEventsCommitted;
        debug!(commits = self.commits, "all events committed");
        Ok(())
    }

    /// Point `origin` at `remote`, add a summary commit and force-push `main`.
    ///
    /// The summary commit is allowed to be empty since every event is already committed.
    pub fn publish(&mut self, remote: &str, today: NaiveDate) -> Result<()> {
        self.expect_state(RepoState::AllEventsCommitted, "publish")?;

        self.runner
            .run_ignoring_failure(&self.path, &GitCommand::new(["remote", "remove", REMOTE_NAME]));
        self.git(GitCommand::new(["remote", "add", REMOTE_NAME, remote]))?;
        self.git(GitCommand::new(["branch", "-M", PRIMARY_BRANCH]))?;
        self.touch_tracked_file()?;
        self.git(GitCommand::new(["add", TRACKED_FILE]))?;
        let summary = format!("Automated contributions up to {}", day_stamp(&today));
        self.git(GitCommand::new(["commit", "--allow-empty", "-m", summary.as_str()]))?;
        self.commits += 1;
        self.git(GitCommand::new(["push", "-u", REMOTE_NAME, PRIMARY_BRANCH, "--force"]))?;

        self.state = RepoState::Published;
        info!(remote, "force-pushed {PRIMARY_BRANCH}");
        Ok(())
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = self.open_tracked_file()?;
        write!(file, "{line}\n\n")?;
        Ok(())
    }

    /// An empty schedule never creates the file, but `git add` needs it to exist.
    fn touch_tracked_file(&self) -> Result<()> {
        self.open_tracked_file()?;
        Ok(())
    }

    fn open_tracked_file(&self) -> Result<File> {
        Ok(OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.tracked_file())?)
    }

    fn git(&self, command: GitCommand) -> Result<()> {
        self.runner.run(&self.path, &command)
    }

    fn expect_state(&self, expected: RepoState, action: &str) -> Result<()> {
        if self.state != expected {
            return Err(GfillError::State(format!(
                "cannot {action} while repository is {:?}",
                self.state
            )));
        }
        Ok(())
    }
}
