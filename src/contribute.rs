use crate::config::Config;
use crate::git::{CommandRunner, ContributionRepo, Ensured};
use crate::model::RunSummary;
use crate::output::{output_initialized, output_schedule, output_summary, Format};
use crate::schedule::Schedule;
use anyhow::Context;
use chrono::Local;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

pub fn exec<R: CommandRunner + ?Sized>(
    config: &Config,
    runner: &R,
    format: Format,
    quiet: bool,
) -> anyhow::Result<RunSummary> {
    if config.dry_run {
        let schedule = Schedule::generate_now(config).context("Failed to generate schedule")?;
        output_schedule(&schedule, format)?;
        return Ok(RunSummary {
            commits: schedule.len(),
            active_days: schedule.active_days(),
            ..RunSummary::default()
        });
    }

    let summary = run(config, runner, quiet)?;
    output_summary(&summary);
    Ok(summary)
}

/// Ensure the repository, replay a fresh schedule as commits, then optionally publish.
pub fn run<R: CommandRunner + ?Sized>(config: &Config, runner: &R, quiet: bool) -> anyhow::Result<RunSummary> {
    let (mut repo, ensured) =
        ContributionRepo::ensure(&config.directory, runner).context("Failed to prepare repository")?;
    if ensured == Ensured::Initialized {
        output_initialized(&config.directory.display().to_string());
    }

    repo.configure_identity(config.identity_name.as_deref(), config.identity_email.as_deref())
        .context("Failed to configure git identity")?;

    let schedule = Schedule::generate_now(config).context("Failed to generate schedule")?;
    info!(events = schedule.len(), days = schedule.active_days(), "replaying schedule");

    let pb = progress_bar(schedule.len() as u64, quiet);
    for event in schedule.events() {
        pb.set_message(event.message());
        repo.realize(event)
            .with_context(|| format!("Failed to commit {}", event.message()))?;
        pb.inc(1);
    }
    pb.finish_and_clear();
    repo.finish_events()?;

    let pushed = match config.remote_url.as_deref() {
        Some(remote) => {
            repo.publish(remote, Local::now().date_naive())
                .context("Failed to publish to remote")?;
            true
        }
        None => false,
    };

    Ok(RunSummary {
        initialized: ensured == Ensured::Initialized,
        commits: repo.commits(),
        active_days: schedule.active_days(),
        pushed,
    })
}

fn progress_bar(len: u64, quiet: bool) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.green}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
