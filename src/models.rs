//! Data models for scraped schedule workload.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Period`]: a (year pair, semester) scrape target
//! - [`TeacherRef`]: a teacher name and the URL of their detail page
//! - [`DetailRow`]: one parsed row of a teacher's workload table
//! - [`TeacherSummary`]: per-teacher aggregate of those rows
//! - [`PeriodResult`]: everything scraped for one period, in one [`Mode`]
//! - [`ExportRow`]: a flattened, period-stamped row ready for a spreadsheet

use serde::Serialize;
use std::fmt;

/// Academic semester within a year pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    /// Both semesters in iteration order.
    pub const ALL: [Semester; 2] = [Semester::First, Semester::Second];

    pub fn number(self) -> u8 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }
}

impl TryFrom<u8> for Semester {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Semester::First),
            2 => Ok(Semester::Second),
            other => Err(format!("semester must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// One scrape target: a pair of two-digit year suffixes and a semester.
///
/// `Period::new(23, 24, Semester::First)` addresses the published schedule
/// for the first semester of 2023/2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub from_year: u8,
    pub to_year: u8,
    pub semester: Semester,
}

impl Period {
    pub fn new(from_year: u8, to_year: u8, semester: Semester) -> Self {
        Self {
            from_year,
            to_year,
            semester,
        }
    }

    /// Path segment used by the schedule site: `(23, 24, First)` becomes `202324_1`.
    pub fn slug(&self) -> String {
        format!("20{:02}{:02}_{}", self.from_year, self.to_year, self.semester)
    }

    /// Numeric period code: the digits of both year suffixes concatenated.
    ///
    /// `(21, 22)` yields `2122`.
    pub fn code(&self) -> u32 {
        u32::from(self.from_year) * 100 + u32::from(self.to_year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "20{:02}/20{:02} semester {}",
            self.from_year, self.to_year, self.semester
        )
    }
}

/// Whether a period is aggregated per teacher or kept row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Summary,
    Full,
}

/// A teacher listed in a period's directory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherRef {
    pub full_name: String,
    pub detail_url: String,
}

/// One row of a teacher's workload table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub teacher: String,
    pub group: String,
    pub subgroup: u32,
    pub discipline: String,
    /// Class type. Empty for tables using the old layout, which has no such column.
    #[serde(rename = "type")]
    pub kind: String,
    pub total_hours: u32,
    pub planned_hours: u32,
    pub fact_hours: u32,
    pub remainder_hours: f64,
    pub planned_two_week_hours: f64,
    pub fact_two_week_hours: u32,
    pub end_date: String,
}

/// Aggregate of one teacher's [`DetailRow`]s within a period.
///
/// `groups` and `disciplines` are deduplicated, keeping first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherSummary {
    pub full_name: String,
    pub groups: Vec<String>,
    pub group_count: usize,
    pub disciplines: Vec<String>,
    pub discipline_count: usize,
    pub total_hours: u32,
}

/// Scraped content of a single period.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodPayload {
    Summary(Vec<TeacherSummary>),
    Detail(Vec<DetailRow>),
}

impl PeriodPayload {
    pub fn len(&self) -> usize {
        match self {
            PeriodPayload::Summary(rows) => rows.len(),
            PeriodPayload::Detail(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`PeriodPayload`] tagged with the period it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodResult {
    pub period: Period,
    pub payload: PeriodPayload,
}

/// The record carried by an [`ExportRow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportRecord {
    Summary(TeacherSummary),
    Detail(DetailRow),
}

/// One flattened output row stamped with its source period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(flatten)]
    pub record: ExportRecord,
    pub period_code: u32,
    pub semester: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_slug() {
        let period = Period::new(23, 24, Semester::First);
        assert_eq!(period.slug(), "202324_1");

        let period = Period::new(5, 6, Semester::Second);
        assert_eq!(period.slug(), "200506_2");
    }

    #[test]
    fn test_period_code() {
        assert_eq!(Period::new(21, 22, Semester::First).code(), 2122);
        assert_eq!(Period::new(9, 10, Semester::Second).code(), 910);
    }

    #[test]
    fn test_semester_try_from() {
        assert_eq!(Semester::try_from(1), Ok(Semester::First));
        assert_eq!(Semester::try_from(2), Ok(Semester::Second));
        assert!(Semester::try_from(3).is_err());
    }

    #[test]
    fn test_export_row_serialization() {
        let row = ExportRow {
            record: ExportRecord::Summary(TeacherSummary {
                full_name: "Ivanov".to_string(),
                groups: vec!["A-1".to_string()],
                group_count: 1,
                disciplines: vec!["Math".to_string()],
                discipline_count: 1,
                total_hours: 36,
            }),
            period_code: 2324,
            semester: 1,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["full_name"], "Ivanov");
        assert_eq!(json["total_hours"], 36);
        assert_eq!(json["period_code"], 2324);
        assert_eq!(json["semester"], 1);
    }

    #[test]
    fn test_detail_row_type_field_name() {
        let row = DetailRow {
            teacher: "T".to_string(),
            group: "G".to_string(),
            subgroup: 0,
            discipline: "D".to_string(),
            kind: "Lecture".to_string(),
            total_hours: 1,
            planned_hours: 1,
            fact_hours: 1,
            remainder_hours: 0.5,
            planned_two_week_hours: 0.0,
            fact_two_week_hours: 0,
            end_date: String::new(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "Lecture");
        assert!(json.get("kind").is_none());
    }
}
