//! # Schedule Workload
//!
//! Scrapes per-teacher workload tables from a university schedule site,
//! aggregates them per period, and dumps the result to a spreadsheet.
//!
//! ## Features
//!
//! - Reads both the old and the new layout of the workload table
//! - Repairs the site's Cyrillic mojibake (Windows-1251 served as Latin-1)
//! - Summary mode (groups, disciplines and total hours per teacher) or
//!   full mode (every table row)
//! - Retrospective runs over a range of years, silently skipping periods
//!   that were never published
//! - XLSX, CSV or JSON dumps
//!
//! ## Usage
//!
//! ```sh
//! schedule_workload --from 23 --to 24 -s 1
//! schedule_workload --from 19 --to 24 --retrospective --full -f csv
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: fetch the teacher directory of each period
//! 2. **Fetching**: fetch and decode each teacher's workload table
//! 3. **Aggregation**: fold rows per teacher, or keep them as they are
//! 4. **Output**: flatten periods into rows and write the dump

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::Settings;
use outputs::{ExportMeta, flatten, write_export};
use scrapers::client::{HttpFetcher, Site};
use scrapers::{retrospective, summary};
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("schedule_workload starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    args.validate()?;

    let settings = Settings::resolve(&args)?;
    info!(base_url = %settings.base_url, dump_dir = %settings.dump_dir, format = ?settings.format, "Resolved settings");

    // Early check: ensure the dump dir is writable before spending time scraping
    if let Err(e) = ensure_writable_dir(&settings.dump_dir).await {
        error!(
            path = %settings.dump_dir,
            error = %e,
            "Dump directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // One session for the whole run
    let fetcher = HttpFetcher::new(&settings.user_agent)?;
    let site = Site::new(&settings.base_url);
    let mode = args.mode();

    // ---- Scrape ----
    let (results, meta) = if args.retrospective {
        info!(from = args.from, to = args.to, ?mode, "Starting retrospective scrape");
        let results = retrospective::collect(&fetcher, &site, args.from, args.to, mode)
            .await
            .inspect_err(|e| error!(error = %truncate_for_log(&e.to_string(), 500), "Retrospective scrape failed"))?;
        (results, ExportMeta::retrospective(args.from, args.to))
    } else {
        let period = args.period()?;
        info!(%period, ?mode, "Starting scrape");
        let result = summary::build_period(&fetcher, &site, period, mode)
            .await
            .inspect_err(|e| error!(error = %truncate_for_log(&e.to_string(), 500), "Scrape failed"))?;
        (vec![result], ExportMeta::single(&period))
    };

    // ---- Output ----
    let rows = flatten(&results);
    info!(periods = results.len(), rows = rows.len(), "Scraping finished");

    if rows.is_empty() {
        warn!("Nothing was scraped; no dump written");
    } else {
        let path = write_export(
            &rows,
            &meta,
            settings.format,
            Path::new(&settings.dump_dir),
            args.file_name.as_deref(),
        )
        .inspect_err(|e| error!(error = %e, "Failed to write dump"))?;
        info!(path = %path.display(), sheet = %meta.sheet_title(), "Dump written");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
