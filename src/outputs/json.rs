//! JSON writer: the rows as one pretty-printed array of objects.

use super::uniform_headers;
use crate::error::ExportError;
use crate::models::ExportRow;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn write(rows: &[ExportRow], path: &Path) -> Result<(), ExportError> {
    uniform_headers(rows)?;

    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)?;
    Ok(())
}
