//! Per-period workload scraping.
//!
//! A period is scraped in two phases:
//!
//! 1. **Indexing**: fetch the teacher directory ([`fetch_directory`])
//! 2. **Fetching**: fetch and decode every teacher's detail page, in
//!    directory order, one request at a time
//!
//! In [`Mode::Summary`] each teacher's rows are folded into one
//! [`TeacherSummary`]; in [`Mode::Full`] the rows are kept as they are.
//! Any failing teacher aborts the whole period.

use crate::error::ScrapeError;
use crate::models::{DetailRow, Mode, Period, PeriodPayload, PeriodResult, TeacherRef, TeacherSummary};
use crate::scrapers::client::{PageFetcher, Site};
use crate::scrapers::decoder::decode_table;
use crate::scrapers::directory::fetch_directory;
use futures::stream::{self, StreamExt, TryStreamExt};
use itertools::Itertools;
use tracing::{debug, info, instrument};

/// Scrape one period in the given mode.
///
/// Output order follows the order teachers appear in the directory.
///
/// # Errors
///
/// A missing directory page surfaces as [`ScrapeError::NotFound`]. A
/// missing detail page is escalated to [`ScrapeError::UnexpectedResponse`]
/// since the period itself exists.
#[instrument(level = "info", skip(fetcher, site, period), fields(period = %period))]
pub async fn build_period<F: PageFetcher>(
    fetcher: &F,
    site: &Site,
    period: Period,
    mode: Mode,
) -> Result<PeriodResult, ScrapeError> {
    let teachers = fetch_directory(fetcher, site, &period).await?;

    let per_teacher: Vec<(TeacherRef, Vec<DetailRow>)> = stream::iter(teachers)
        .then(|teacher| async move {
            let rows = fetch_teacher_rows(fetcher, &teacher).await?;
            Ok::<_, ScrapeError>((teacher, rows))
        })
        .try_collect()
        .await?;

    let payload = match mode {
        Mode::Summary => PeriodPayload::Summary(
            per_teacher
                .iter()
                .map(|(teacher, rows)| summarize(&teacher.full_name, rows))
                .collect(),
        ),
        Mode::Full => PeriodPayload::Detail(
            per_teacher
                .into_iter()
                .flat_map(|(_, rows)| rows)
                .collect(),
        ),
    };

    info!(rows = payload.len(), ?mode, "Scraped period");
    Ok(PeriodResult { period, payload })
}

/// Fetch and decode one teacher's detail page.
#[instrument(level = "debug", skip_all, fields(teacher = %teacher.full_name))]
pub async fn fetch_teacher_rows<F: PageFetcher>(
    fetcher: &F,
    teacher: &TeacherRef,
) -> Result<Vec<DetailRow>, ScrapeError> {
    let html = fetcher
        .fetch(&teacher.detail_url)
        .await
        .map_err(ScrapeError::escalate_not_found)?;
    let rows = decode_table(&html, &teacher.detail_url)?;
    debug!(rows = rows.len(), "Decoded teacher rows");
    Ok(rows)
}

/// Fold a teacher's rows into a [`TeacherSummary`].
pub fn summarize(full_name: &str, rows: &[DetailRow]) -> TeacherSummary {
    let groups: Vec<String> = rows.iter().map(|r| r.group.clone()).unique().collect();
    let disciplines: Vec<String> = rows
        .iter()
        .map(|r| r.discipline.clone())
        .unique()
        .collect();

    TeacherSummary {
        full_name: full_name.to_string(),
        group_count: groups.len(),
        groups,
        discipline_count: disciplines.len(),
        disciplines,
        total_hours: rows.iter().map(|r| r.total_hours).sum(),
    }
}
