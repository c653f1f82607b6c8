use crate::config::{Config, DAY_START_HOUR};
use crate::error::{GfillError, Result};
use crate::model::Event;
use crate::util::is_weekend;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Chronological list of events covering the configured window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    start: NaiveDateTime,
    days: u64,
    events: Vec<Event>,
}

impl Schedule {
    /// Generates against the local clock, seeded from the config when a seed is set.
    pub fn generate_now(config: &Config) -> Result<Self> {
        let now = Local::now().naive_local();
        match config.seed {
            Some(seed) => generate(config, now, &mut StdRng::seed_from_u64(seed)),
            None => generate(config, now, &mut rand::thread_rng()),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::days(self.days as i64)
    }

    pub fn days(&self) -> u64 {
        self.days
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn active_days(&self) -> usize {
        self.events
            .iter()
            .map(Event::date)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

pub fn window_start(config: &Config, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let day_start = NaiveTime::from_hms_opt(DAY_START_HOUR, 0, 0)
        .ok_or_else(|| GfillError::InvalidDate(format!("Invalid start hour: {DAY_START_HOUR}")))?;
    now.date()
        .and_time(day_start)
        .checked_sub_signed(Duration::days(i64::from(config.days_before)))
        .ok_or_else(|| {
            GfillError::InvalidDate(format!("{} days before {now} is out of range", config.days_before))
        })
}

pub fn generate<R: Rng + ?Sized>(config: &Config, now: NaiveDateTime, rng: &mut R) -> Result<Schedule> {
    let start = window_start(config, now)?;
    let days = config.window_days();
    let cap = config.events_per_day_cap();
    let mut events = Vec::new();

    for offset in 0..days {
        let day = start
            .checked_add_signed(Duration::days(offset as i64))
            .ok_or_else(|| GfillError::InvalidDate(format!("{offset} days after {start} is out of range")))?;

        if config.skip_weekends && is_weekend(&day.date()) {
            trace!(%day, "skipping weekend");
            continue;
        }
        if rng.gen_range(0..100) >= config.activity_probability_percent {
            trace!(%day, "day not activated");
            continue;
        }

        let count = rng.gen_range(1..=cap);
        trace!(%day, count, "day activated");
        events.extend((0..count).map(|m| Event::new(day + Duration::minutes(i64::from(m)))));
    }

    debug!(%start, days, events = events.len(), "generated schedule");
    Ok(Schedule { start, days, events })
}
