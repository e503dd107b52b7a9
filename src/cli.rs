//! Command-line interface definitions for the workload scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Site and output settings can also come from environment variables or a
//! YAML config file (see [`crate::config`]).

use crate::models::{Mode, Period, Semester};
use crate::outputs::ExportFormat;
use clap::Parser;

/// Command-line arguments for the workload scraper.
///
/// # Examples
///
/// ```sh
/// # Per-teacher summary for the first semester of 2023/2024
/// schedule_workload --from 23 --to 24 -s 1
///
/// # Every table row for both semesters of 2019/2020 through 2022/2023
/// schedule_workload --from 19 --to 23 --retrospective --full
///
/// # CSV into a custom directory
/// schedule_workload --from 23 --to 24 -f csv -o /tmp/dumps
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// First year of the academic year pair, two digits (e.g. 23)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=99))]
    pub from: u8,

    /// Second year of the pair; with --retrospective, the exclusive end year
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=99))]
    pub to: u8,

    /// Semester to scrape (ignored with --retrospective)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub semester: u8,

    /// Scrape every year in [from, to), both semesters, skipping unpublished periods
    #[arg(short, long)]
    pub retrospective: bool,

    /// Keep every table row instead of per-teacher summaries
    #[arg(long)]
    pub full: bool,

    /// Dump file format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Directory the dump is written to
    #[arg(short, long, env = "SCHEDULE_DUMP_DIR")]
    pub output_dir: Option<String>,

    /// Dump file name (default: DUMP_<timestamp>.<ext>)
    #[arg(long)]
    pub file_name: Option<String>,

    /// Root URL of the schedule site
    #[arg(long, env = "SCHEDULE_BASE_URL")]
    pub base_url: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.full { Mode::Full } else { Mode::Summary }
    }

    /// The single period addressed when not running retrospectively.
    pub fn period(&self) -> Result<Period, String> {
        let semester = Semester::try_from(self.semester)?;
        Ok(Period::new(self.from, self.to, semester))
    }

    /// Reject argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.retrospective && self.from >= self.to {
            return Err(format!(
                "--retrospective needs --from < --to (got {} and {})",
                self.from, self.to
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["schedule_workload", "--from", "23", "--to", "24"]);

        assert_eq!(cli.from, 23);
        assert_eq!(cli.to, 24);
        assert_eq!(cli.semester, 1);
        assert!(!cli.retrospective);
        assert_eq!(cli.mode(), Mode::Summary);
        assert_eq!(cli.period().unwrap(), Period::new(23, 24, Semester::First));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "schedule_workload",
            "--from",
            "19",
            "--to",
            "23",
            "-r",
            "--full",
            "-f",
            "csv",
            "-o",
            "/tmp/dumps",
        ]);

        assert!(cli.retrospective);
        assert_eq!(cli.mode(), Mode::Full);
        assert_eq!(cli.format, Some(ExportFormat::Csv));
        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/dumps"));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_semester() {
        let result = Cli::try_parse_from(["schedule_workload", "--from", "23", "--to", "24", "-s", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_three_digit_year() {
        let result = Cli::try_parse_from(["schedule_workload", "--from", "123", "--to", "124"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_retrospective_needs_increasing_range() {
        let cli = Cli::parse_from(["schedule_workload", "--from", "23", "--to", "23", "-r"]);
        assert!(cli.validate().is_err());
    }
}
