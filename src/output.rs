use crate::model::{EventRecord, RunSummary, ScheduleOutput, SCHEMA_VERSION};
use crate::schedule::Schedule;
use anyhow::Result;
use chrono::Utc;
use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
    Ndjson,
}

impl Format {
    pub fn from_flags(json: bool, ndjson: bool) -> Self {
        if json {
            Format::Json
        } else if ndjson {
            Format::Ndjson
        } else {
            Format::Text
        }
    }
}

pub fn schedule_output(schedule: &Schedule) -> ScheduleOutput {
    ScheduleOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        window_start: schedule.start(),
        window_end: schedule.end(),
        active_days: schedule.active_days(),
        events: schedule.events().iter().map(EventRecord::from).collect(),
    }
}

pub fn output_schedule(schedule: &Schedule, format: Format) -> Result<()> {
    match format {
        Format::Json => output_json(schedule),
        Format::Ndjson => output_ndjson(schedule),
        Format::Text => output_text(schedule),
    }
}

pub fn output_json(schedule: &Schedule) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&schedule_output(schedule))?);
    Ok(())
}

pub fn output_ndjson(schedule: &Schedule) -> Result<()> {
    for event in schedule.events() {
        println!("{}", serde_json::to_string(&EventRecord::from(event))?);
    }
    Ok(())
}

pub fn output_text(schedule: &Schedule) -> Result<()> {
    println!(
        "{} {} to {}",
        style("Schedule").bold(),
        crate::util::minute_stamp(&schedule.start()),
        crate::util::minute_stamp(&schedule.end()),
    );
    println!("{}", "─".repeat(50));

    if schedule.is_empty() {
        println!("No commits scheduled");
        return Ok(());
    }

    for event in schedule.events() {
        println!("{}", event.message());
    }
    println!(
        "\n{} commits across {} days",
        style(schedule.len()).green(),
        style(schedule.active_days()).green()
    );
    Ok(())
}

pub fn output_initialized(directory: &str) {
    println!("Initialized a new repository in {directory}");
}

pub fn output_summary(summary: &RunSummary) {
    println!(
        "{} commits across {} days{}",
        style(summary.commits).green(),
        style(summary.active_days).green(),
        if summary.pushed { ", pushed to origin" } else { "" }
    );
    println!("\n{}", style("Repository contributions successfully updated!").bold());
}
