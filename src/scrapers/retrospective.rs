//! Multi-year scraping over a contiguous range of periods.
//!
//! For every year `y` in `[from_year, to_year)` the periods `(y, y+1, 1)`
//! and `(y, y+1, 2)` are scraped in that order. Each attempt is classified
//! as a [`PeriodOutcome`]: a period whose directory page does not exist is
//! skipped, any other failure aborts the run.

use crate::error::ScrapeError;
use crate::models::{Mode, Period, PeriodResult, Semester};
use crate::scrapers::client::{PageFetcher, Site};
use crate::scrapers::summary::build_period;
use tracing::{info, instrument};

/// Result of attempting one period.
#[derive(Debug)]
pub enum PeriodOutcome {
    Collected(PeriodResult),
    /// The period has no published schedule.
    Skipped(Period),
}

impl PeriodOutcome {
    /// Classify a scrape attempt: not-found becomes [`PeriodOutcome::Skipped`],
    /// every other error stays fatal.
    pub fn classify(
        period: Period,
        attempt: Result<PeriodResult, ScrapeError>,
    ) -> Result<Self, ScrapeError> {
        match attempt {
            Ok(result) => Ok(PeriodOutcome::Collected(result)),
            Err(e) if e.is_not_found() => Ok(PeriodOutcome::Skipped(period)),
            Err(e) => Err(e),
        }
    }
}

/// Every period of the range in scrape order: year ascending, semester 1 before 2.
pub fn periods_in_range(from_year: u8, to_year: u8) -> Vec<Period> {
    (from_year..to_year)
        .flat_map(|year| {
            Semester::ALL
                .into_iter()
                .map(move |semester| Period::new(year, year + 1, semester))
        })
        .collect()
}

/// Scrape every period of `[from_year, to_year)` and concatenate the results.
///
/// Skipped periods are absent from the output. The first fatal error is
/// returned immediately and no further periods are requested.
#[instrument(level = "info", skip(fetcher, site))]
pub async fn collect<F: PageFetcher>(
    fetcher: &F,
    site: &Site,
    from_year: u8,
    to_year: u8,
    mode: Mode,
) -> Result<Vec<PeriodResult>, ScrapeError> {
    let mut results = Vec::new();
    let mut skipped = 0usize;

    for period in periods_in_range(from_year, to_year) {
        let attempt = build_period(fetcher, site, period, mode).await;
        match PeriodOutcome::classify(period, attempt)? {
            PeriodOutcome::Collected(result) => results.push(result),
            PeriodOutcome::Skipped(period) => {
                skipped += 1;
                info!(%period, "No schedule published; skipping");
            }
        }
    }

    info!(collected = results.len(), skipped, "Retrospective complete");
    Ok(results)
}
