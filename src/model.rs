use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Label prefixed to every generated line and commit message.
pub const MESSAGE_LABEL: &str = "Contribution";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Event {
    pub at: NaiveDateTime,
}

impl Event {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    pub fn date(&self) -> NaiveDate {
        self.at.date()
    }

    /// Line appended to the tracked file, reused as the commit message.
    pub fn message(&self) -> String {
        format!("{MESSAGE_LABEL}: {}", crate::util::minute_stamp(&self.at))
    }

    /// Value handed to git for both the author and committer date.
    pub fn commit_date(&self) -> String {
        crate::util::second_stamp(&self.at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub commit_date: String,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        Self {
            timestamp: event.at,
            message: event.message(),
            commit_date: event.commit_date(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub active_days: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub initialized: bool,
    pub commits: usize,
    pub active_days: usize,
    pub pushed: bool,
}
