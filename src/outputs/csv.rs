//! CSV writer: header row, then one record per [`ExportRow`].

use super::uniform_headers;
use crate::error::ExportError;
use crate::models::ExportRow;
use std::path::Path;

pub fn write(rows: &[ExportRow], path: &Path) -> Result<(), ExportError> {
    let headers = uniform_headers(rows)?;

    let mut writer = ::csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row.cells().iter().map(|cell| cell.render()))?;
    }
    writer.flush()?;
    Ok(())
}
