//! Decoder for teacher workload tables.
//!
//! The site has published two layouts of the same table over the years.
//! The layout is chosen once per page by counting the header cells of the
//! result table (`table.inf .hd`):
//!
//! | Header cells | Layout | Type column | Total hours column |
//! |--------------|--------|-------------|--------------------|
//! | 14 | [`TableSchema::New`] | 5 | 6 |
//! | anything else | [`TableSchema::Old`] | absent (empty string) | 5 |
//!
//! Every cell text is repaired from the site's mojibake and trimmed before
//! use. Integer columns must parse as integers; the remainder and two-week
//! plan columns use a comma as decimal separator.

use crate::error::ScrapeError;
use crate::models::DetailRow;
use crate::utils::{parse_comma_float, repair_cyrillic};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static RESULT_TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table.inf").unwrap());
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse(".hd").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Header cell count that identifies the new layout.
pub const NEW_SCHEMA_HEADER_CELLS: usize = 14;

/// Column layout of a workload table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSchema {
    Old,
    New,
}

impl TableSchema {
    pub fn detect(header_cells: usize) -> Self {
        if header_cells == NEW_SCHEMA_HEADER_CELLS {
            TableSchema::New
        } else {
            TableSchema::Old
        }
    }

    fn columns(self) -> &'static ColumnMap {
        match self {
            TableSchema::New => &NEW_COLUMNS,
            TableSchema::Old => &OLD_COLUMNS,
        }
    }
}

struct ColumnMap {
    teacher: usize,
    group: usize,
    subgroup: usize,
    discipline: usize,
    kind: Option<usize>,
    total_hours: usize,
    planned_hours: usize,
    fact_hours: usize,
    remainder_hours: usize,
    planned_two_week_hours: usize,
    fact_two_week_hours: usize,
    end_date: usize,
}

const NEW_COLUMNS: ColumnMap = ColumnMap {
    teacher: 1,
    group: 2,
    subgroup: 3,
    discipline: 4,
    kind: Some(5),
    total_hours: 6,
    planned_hours: 7,
    fact_hours: 8,
    remainder_hours: 9,
    planned_two_week_hours: 10,
    fact_two_week_hours: 11,
    end_date: 12,
};

const OLD_COLUMNS: ColumnMap = ColumnMap {
    teacher: 1,
    group: 2,
    subgroup: 3,
    discipline: 4,
    kind: None,
    total_hours: 5,
    planned_hours: 6,
    fact_hours: 7,
    remainder_hours: 8,
    planned_two_week_hours: 9,
    fact_two_week_hours: 10,
    end_date: 11,
};

/// Locate the site's result table in a parsed page.
pub fn result_table<'a>(document: &'a Html, url: &str) -> Result<ElementRef<'a>, ScrapeError> {
    document
        .select(&RESULT_TABLE)
        .next()
        .ok_or_else(|| ScrapeError::MalformedPage {
            url: url.to_string(),
            reason: "result table `table.inf` not found".to_string(),
        })
}

/// Decode every data row of a teacher detail page.
///
/// The first row of the result table is the header and is skipped, as are
/// rows without any `td` cell.
pub fn decode_table(html: &str, url: &str) -> Result<Vec<DetailRow>, ScrapeError> {
    let document = Html::parse_document(html);
    let table = result_table(&document, url)?;

    let header_cells = table.select(&HEADER_CELL).count();
    let schema = TableSchema::detect(header_cells);
    debug!(%url, header_cells, ?schema, "Detected table layout");

    let mut rows = Vec::new();
    for row in table.select(&ROW).skip(1) {
        let cells: Vec<String> = row
            .select(&CELL)
            .map(|cell| cell.text().collect::<String>())
            .collect();
        if cells.is_empty() {
            continue;
        }
        rows.push(decode_row(&cells, schema)?);
    }
    Ok(rows)
}

/// Decode one row from its raw cell texts.
///
/// # Errors
///
/// [`ScrapeError::MalformedRow`] when a column is missing or a numeric
/// column does not parse. The error carries the repaired cell texts.
pub fn decode_row(raw_cells: &[String], schema: TableSchema) -> Result<DetailRow, ScrapeError> {
    let cells: Vec<String> = raw_cells
        .iter()
        .map(|c| repair_cyrillic(c).trim().to_string())
        .collect();
    let row = RowCells { cells: &cells };
    let map = schema.columns();

    Ok(DetailRow {
        teacher: row.text(map.teacher)?,
        group: row.text(map.group)?,
        subgroup: row.integer(map.subgroup)?,
        discipline: row.text(map.discipline)?,
        kind: match map.kind {
            Some(index) => row.text(index)?,
            None => String::new(),
        },
        total_hours: row.integer(map.total_hours)?,
        planned_hours: row.integer(map.planned_hours)?,
        fact_hours: row.integer(map.fact_hours)?,
        remainder_hours: row.float(map.remainder_hours)?,
        planned_two_week_hours: row.float(map.planned_two_week_hours)?,
        fact_two_week_hours: row.integer(map.fact_two_week_hours)?,
        end_date: row.text(map.end_date)?,
    })
}

struct RowCells<'a> {
    cells: &'a [String],
}

impl RowCells<'_> {
    fn malformed(&self, reason: String) -> ScrapeError {
        ScrapeError::MalformedRow {
            reason,
            cells: self.cells.to_vec(),
        }
    }

    fn text(&self, index: usize) -> Result<String, ScrapeError> {
        self.cells
            .get(index)
            .cloned()
            .ok_or_else(|| self.malformed(format!("missing column {index}")))
    }

    fn integer(&self, index: usize) -> Result<u32, ScrapeError> {
        let text = self.text(index)?;
        text.parse::<u32>()
            .map_err(|_| self.malformed(format!("column {index} is not an integer: {text:?}")))
    }

    fn float(&self, index: usize) -> Result<f64, ScrapeError> {
        let text = self.text(index)?;
        parse_comma_float(&text)
            .ok_or_else(|| self.malformed(format!("column {index} is not a number: {text:?}")))
    }
}
