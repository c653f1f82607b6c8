use crate::cli::CommonArgs;
use std::path::PathBuf;
use tracing::warn;

pub const MIN_EVENTS_PER_DAY: u32 = 1;
pub const MAX_EVENTS_PER_DAY: u32 = 20;

pub const DEFAULT_DIRECTORY: &str = "repository-contributions";
pub const TRACKED_FILE: &str = "README.md";

/// Hour of day at which every generated day starts.
pub const DAY_START_HOUR: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub skip_weekends: bool,
    pub max_events_per_day: i64,
    pub activity_probability_percent: u32,
    pub remote_url: Option<String>,
    pub identity_name: Option<String>,
    pub identity_email: Option<String>,
    pub days_before: u32,
    pub days_after: u32,
    pub directory: PathBuf,
    pub seed: Option<u64>,
    pub dry_run: bool,
}

impl Config {
    pub fn from_args(args: &CommonArgs) -> Self {
        let config = Self {
            skip_weekends: args.no_weekends,
            max_events_per_day: args.max_commits,
            activity_probability_percent: args.frequency,
            remote_url: args.repository.clone(),
            identity_name: args.user_name.clone(),
            identity_email: args.user_email.clone(),
            days_before: args.days_before,
            days_after: args.days_after,
            directory: args.dir.clone(),
            seed: args.seed,
            dry_run: args.dry_run,
        };

        let cap = config.events_per_day_cap();
        if i64::from(cap) != config.max_events_per_day {
            warn!(
                requested = config.max_events_per_day,
                effective = cap,
                "max commits per day out of range, clamping"
            );
        }
        config
    }

    /// Upper bound of the per-day event draw, silently kept within [1, 20].
    pub fn events_per_day_cap(&self) -> u32 {
        let clamped = self
            .max_events_per_day
            .clamp(i64::from(MIN_EVENTS_PER_DAY), i64::from(MAX_EVENTS_PER_DAY));
        clamped as u32
    }

    pub fn window_days(&self) -> u64 {
        u64::from(self.days_before) + u64::from(self.days_after)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_weekends: false,
            max_events_per_day: 10,
            activity_probability_percent: 80,
            remote_url: None,
            identity_name: None,
            identity_email: None,
            days_before: 365,
            days_after: 0,
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            seed: None,
            dry_run: false,
        }
    }
}
