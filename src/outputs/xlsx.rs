//! Excel workbook writer.
//!
//! Produces one worksheet titled after the [`ExportMeta`] (for example
//! `2023 - 2024 | 1`) with a header row followed by one row per
//! [`ExportRow`]. Numeric fields are written as numbers so the sheet can
//! be summed and filtered directly.

use super::{Cell, ExportMeta, uniform_headers};
use crate::error::ExportError;
use crate::models::ExportRow;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::debug;

pub fn write(rows: &[ExportRow], meta: &ExportMeta, path: &Path) -> Result<(), ExportError> {
    let headers = uniform_headers(rows)?;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(meta.sheet_title())?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let line = (i + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(line, col, text)?;
                }
                Cell::Number(number) => {
                    sheet.write_number(line, col, number)?;
                }
            }
        }
    }

    workbook.save(path)?;
    debug!(path = %path.display(), rows = rows.len(), "Saved workbook");
    Ok(())
}
