use crate::config::{Config, DEFAULT_DIRECTORY};
use crate::git::ProcessRunner;
use anyhow::Result;
use clap::{ArgAction, Args, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::Level;

/// Two-letter single-dash spellings and the long flag each one stands for.
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-nw", "--no_weekends"),
    ("-mc", "--max_commits"),
    ("-fr", "--frequency"),
    ("-un", "--user_name"),
    ("-ue", "--user_email"),
    ("-db", "--days_before"),
    ("-da", "--days_after"),
];

#[derive(Parser)]
#[command(name = "gfill")]
#[command(about = "Generate a dated commit history to fill a contribution graph")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (repeatable)")]
    pub verbose: u8,

    #[arg(short, long, help = "Only log errors and hide progress", conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long = "no_weekends", visible_alias = "no-weekends", help = "Do not commit on weekends")]
    pub no_weekends: bool,

    #[arg(
        long = "max_commits",
        visible_alias = "max-commits",
        default_value_t = 10,
        allow_negative_numbers = true,
        help = "Max commits per day, kept within 1..=20"
    )]
    pub max_commits: i64,

    #[arg(long, default_value_t = 80, help = "Percentage of days with commits")]
    pub frequency: u32,

    #[arg(short = 'r', long, help = "Remote repository URL; force-pushes the result when set")]
    pub repository: Option<String>,

    #[arg(
        long = "user_name",
        visible_alias = "user-name",
        allow_hyphen_values = true,
        help = "Git user.name (overrides global config)"
    )]
    pub user_name: Option<String>,

    #[arg(
        long = "user_email",
        visible_alias = "user-email",
        allow_hyphen_values = true,
        help = "Git user.email (overrides global config)"
    )]
    pub user_email: Option<String>,

    #[arg(
        long = "days_before",
        visible_alias = "days-before",
        default_value_t = 365,
        help = "Number of days before today to simulate commits"
    )]
    pub days_before: u32,

    #[arg(
        long = "days_after",
        visible_alias = "days-after",
        default_value_t = 0,
        help = "Number of days after today to simulate commits"
    )]
    pub days_after: u32,

    #[arg(long, default_value = DEFAULT_DIRECTORY, help = "Working repository directory")]
    pub dir: PathBuf,

    #[arg(long, help = "Seed for a reproducible schedule")]
    pub seed: Option<u64>,

    #[arg(long = "dry-run", alias = "dry_run", help = "Print the schedule without touching git")]
    pub dry_run: bool,

    #[arg(long, requires = "dry_run", help = "Output the dry-run schedule as JSON")]
    pub json: bool,

    #[arg(long, requires = "dry_run", conflicts_with = "json", help = "Output the dry-run schedule as NDJSON")]
    pub ndjson: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::from_args(&self.common);
        let format = crate::output::Format::from_flags(self.common.json, self.common.ndjson);
        crate::contribute::exec(&config, &ProcessRunner, format, self.quiet)?;
        Ok(())
    }
}

/// Long and short spellings whose next token is a value, never a flag.
const VALUE_FLAGS: &[&str] = &[
    "--max_commits",
    "--max-commits",
    "--frequency",
    "-r",
    "--repository",
    "--user_name",
    "--user-name",
    "--user_email",
    "--user-email",
    "--days_before",
    "--days-before",
    "--days_after",
    "--days-after",
    "--dir",
    "--seed",
];

/// Rewrites `-nw`, `-mc=5` and friends into their long forms so clap can parse them.
///
/// The token following a value-taking flag is passed through untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut value_next = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if std::mem::take(&mut value_next) {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            let (flag, value) = match text.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (text, None),
            };
            let long = LEGACY_FLAGS
                .iter()
                .find(|(short, _)| *short == flag)
                .map(|(_, long)| *long);
            let canonical = long.unwrap_or(flag);
            value_next = value.is_none() && VALUE_FLAGS.contains(&canonical);
            match (long, value) {
                (Some(long), Some(value)) => OsString::from(format!("{long}={value}")),
                (Some(long), None) => OsString::from(long),
                (None, _) => arg,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["gfill"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(normalize_args(argv)).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = parse(&[]);
        let c = &cli.common;
        assert!(!c.no_weekends);
        assert_eq!(c.max_commits, 10);
        assert_eq!(c.frequency, 80);
        assert_eq!(c.repository, None);
        assert_eq!(c.days_before, 365);
        assert_eq!(c.days_after, 0);
        assert_eq!(c.dir, PathBuf::from("repository-contributions"));
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn legacy_short_flags_are_accepted() {
        let cli = parse(&[
            "-nw", "-mc", "3", "-fr=50", "-r", "git@example.com:me/repo.git", "-un", "Me", "-ue",
            "me@example.com", "-db", "7", "-da", "2",
        ]);
        let c = &cli.common;
        assert!(c.no_weekends);
        assert_eq!(c.max_commits, 3);
        assert_eq!(c.frequency, 50);
        assert_eq!(c.repository.as_deref(), Some("git@example.com:me/repo.git"));
        assert_eq!(c.user_name.as_deref(), Some("Me"));
        assert_eq!(c.user_email.as_deref(), Some("me@example.com"));
        assert_eq!(c.days_before, 7);
        assert_eq!(c.days_after, 2);
    }

    #[test]
    fn snake_and_kebab_long_flags_both_work() {
        let snake = parse(&["--days_before", "4", "--no_weekends"]);
        let kebab = parse(&["--days-before", "4", "--no-weekends"]);
        assert_eq!(snake.common.days_before, kebab.common.days_before);
        assert_eq!(snake.common.no_weekends, kebab.common.no_weekends);
    }

    #[test]
    fn negative_max_commits_is_parsed_for_clamping() {
        let cli = parse(&["-mc", "-4"]);
        assert_eq!(cli.common.max_commits, -4);
    }

    #[test]
    fn negative_day_counts_are_rejected() {
        let argv = normalize_args(["gfill", "-db", "-1"]);
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn json_requires_dry_run() {
        let argv = normalize_args(["gfill", "--json"]);
        assert!(Cli::try_parse_from(argv).is_err());
        let cli = parse(&["--dry-run", "--json"]);
        assert!(cli.common.json);
    }

    #[test]
    fn normalize_leaves_values_after_separator() {
        let out = normalize_args(["gfill", "--", "-nw"]);
        assert_eq!(out, vec![OsString::from("gfill"), OsString::from("--"), OsString::from("-nw")]);
    }

    #[test]
    fn values_that_look_like_legacy_flags_are_kept() {
        let out = normalize_args(["gfill", "-un", "-db", "--user_email", "-nw", "-db", "2"]);
        assert_eq!(
            out,
            vec![
                OsString::from("gfill"),
                OsString::from("--user_name"),
                OsString::from("-db"),
                OsString::from("--user_email"),
                OsString::from("-nw"),
                OsString::from("--days_before"),
                OsString::from("2"),
            ]
        );
    }

    #[test]
    fn equals_form_does_not_consume_next_token() {
        let out = normalize_args(["gfill", "-un=Me", "-nw"]);
        assert_eq!(
            out,
            vec![OsString::from("gfill"), OsString::from("--user_name=Me"), OsString::from("--no_weekends")]
        );
    }

    #[test]
    fn user_name_may_look_like_a_flag() {
        let cli = parse(&["-un", "-db", "-db", "4"]);
        assert_eq!(cli.common.user_name.as_deref(), Some("-db"));
        assert_eq!(cli.common.days_before, 4);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(parse(&["-v"]).log_level(), Level::INFO);
        assert_eq!(parse(&["-vv"]).log_level(), Level::DEBUG);
        assert_eq!(parse(&["-vvv"]).log_level(), Level::TRACE);
        assert_eq!(parse(&["-q"]).log_level(), Level::ERROR);
    }
}
