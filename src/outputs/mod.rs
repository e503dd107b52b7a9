//! Export of scraped periods.
//!
//! Scraped [`PeriodResult`]s are flattened into [`ExportRow`]s, one per
//! teacher (summary mode) or one per table row (full mode), each stamped
//! with its period code and semester. The rows are then written by one of
//! the writers:
//!
//! - [`xlsx`]: Excel workbook with a single sheet (default)
//! - [`csv`]: comma-separated file
//! - [`json`]: array of row objects
//!
//! # Output Structure
//!
//! ```text
//! dump_dir/
//! └── DUMP_19_10_26_14-05-09.xlsx
//! ```
//!
//! All rows of one export must be of the same kind.

pub mod csv;
pub mod json;
pub mod xlsx;

use crate::error::ExportError;
use crate::models::{
    DetailRow, ExportRecord, ExportRow, Period, PeriodPayload, PeriodResult, TeacherSummary,
};
use crate::utils::dump_file_name;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const SUMMARY_HEADERS: &[&str] = &[
    "ФИО",
    "Группы",
    "Кол-во групп",
    "Дисциплины",
    "Кол-во дисциплин",
    "Сумм. часов",
    "Период",
    "Семестр",
];

const DETAIL_HEADERS: &[&str] = &[
    "ФИО",
    "Группа",
    "Подгруппа",
    "Дисциплина",
    "Тип",
    "Всего часов",
    "План",
    "Факт",
    "Остаток",
    "План 2 нед.",
    "Факт 2 нед.",
    "Дата окончания",
    "Период",
    "Семестр",
];

/// File format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Describes what a dump covers; used for the sheet title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMeta {
    pub from_year: u8,
    pub to_year: u8,
    pub semester_label: String,
}

impl ExportMeta {
    pub fn single(period: &Period) -> Self {
        Self {
            from_year: period.from_year,
            to_year: period.to_year,
            semester_label: period.semester.to_string(),
        }
    }

    /// Meta for a range of years covering both semesters.
    pub fn retrospective(from_year: u8, to_year: u8) -> Self {
        Self {
            from_year,
            to_year,
            semester_label: "1+2".to_string(),
        }
    }

    /// e.g. `2023 - 2024 | 1`
    pub fn sheet_title(&self) -> String {
        format!(
            "20{:02} - 20{:02} | {}",
            self.from_year, self.to_year, self.semester_label
        )
    }
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn int(value: impl Into<f64>) -> Self {
        Cell::Number(value.into())
    }

    /// Plain-text rendering for text formats.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl ExportRow {
    pub fn headers(&self) -> &'static [&'static str] {
        match self.record {
            ExportRecord::Summary(_) => SUMMARY_HEADERS,
            ExportRecord::Detail(_) => DETAIL_HEADERS,
        }
    }

    /// Cells in [`ExportRow::headers`] order. List fields are joined with `", "`.
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = match &self.record {
            ExportRecord::Summary(s) => summary_cells(s),
            ExportRecord::Detail(d) => detail_cells(d),
        };
        cells.push(Cell::int(self.period_code));
        cells.push(Cell::int(self.semester));
        cells
    }
}

fn summary_cells(s: &TeacherSummary) -> Vec<Cell> {
    vec![
        Cell::Text(s.full_name.clone()),
        Cell::Text(s.groups.join(", ")),
        Cell::Number(s.group_count as f64),
        Cell::Text(s.disciplines.join(", ")),
        Cell::Number(s.discipline_count as f64),
        Cell::int(s.total_hours),
    ]
}

fn detail_cells(d: &DetailRow) -> Vec<Cell> {
    vec![
        Cell::Text(d.teacher.clone()),
        Cell::Text(d.group.clone()),
        Cell::int(d.subgroup),
        Cell::Text(d.discipline.clone()),
        Cell::Text(d.kind.clone()),
        Cell::int(d.total_hours),
        Cell::int(d.planned_hours),
        Cell::int(d.fact_hours),
        Cell::Number(d.remainder_hours),
        Cell::Number(d.planned_two_week_hours),
        Cell::int(d.fact_two_week_hours),
        Cell::Text(d.end_date.clone()),
    ]
}

/// Flatten period results into export rows, preserving order.
pub fn flatten(results: &[PeriodResult]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for result in results {
        let period_code = result.period.code();
        let semester = result.period.semester.number();
        let stamp = |record| ExportRow {
            record,
            period_code,
            semester,
        };
        match &result.payload {
            PeriodPayload::Summary(summaries) => rows.extend(
                summaries
                    .iter()
                    .cloned()
                    .map(ExportRecord::Summary)
                    .map(stamp),
            ),
            PeriodPayload::Detail(details) => rows.extend(
                details
                    .iter()
                    .cloned()
                    .map(ExportRecord::Detail)
                    .map(stamp),
            ),
        }
    }
    rows
}

/// Check that rows are non-empty and of one kind; return their headers.
pub fn uniform_headers(rows: &[ExportRow]) -> Result<&'static [&'static str], ExportError> {
    let first = rows.first().ok_or(ExportError::Empty)?;
    let headers = first.headers();
    if rows.iter().any(|row| row.headers() != headers) {
        return Err(ExportError::MixedRows);
    }
    Ok(headers)
}

/// Write rows to `dump_dir` in `format` and return the written path.
///
/// Without `file_name` a timestamped `DUMP_*` name is used.
#[instrument(level = "info", skip(rows, meta), fields(rows = rows.len()))]
pub fn write_export(
    rows: &[ExportRow],
    meta: &ExportMeta,
    format: ExportFormat,
    dump_dir: &Path,
    file_name: Option<&str>,
) -> Result<PathBuf, ExportError> {
    let file_name = file_name
        .map(str::to_string)
        .unwrap_or_else(|| dump_file_name(format.extension()));
    let path = dump_dir.join(file_name);

    match format {
        ExportFormat::Xlsx => xlsx::write(rows, meta, &path)?,
        ExportFormat::Csv => csv::write(rows, &path)?,
        ExportFormat::Json => json::write(rows, &path)?,
    }

    info!(path = %path.display(), "Wrote dump");
    Ok(path)
}
