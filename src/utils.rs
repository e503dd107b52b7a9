//! Utility functions for text repair, number parsing, and file system operations.
//!
//! This module provides helper functions used throughout the application:
//! - Repair of the schedule site's legacy Cyrillic mojibake
//! - Comma-as-decimal-separator float parsing
//! - String truncation for logging
//! - Dump file naming and output directory validation

use chrono::Local;
use encoding_rs::WINDOWS_1251;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Map raw response bytes to text one code point per byte.
///
/// This is the Western single-byte reading of the page (ISO-8859-1). It
/// never fails and keeps every byte recoverable for [`repair_cyrillic`].
pub fn latin1_from_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Undo the site's mis-decoding: re-encode text as single bytes and decode
/// them again as Windows-1251.
///
/// Code points above U+00FF cannot come from a single-byte reading and are
/// kept as they are.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(repair_cyrillic("\u{C8}\u{E2}\u{E0}\u{ED}\u{EE}\u{E2}"), "Иванов");
/// ```
pub fn repair_cyrillic(text: &str) -> String {
    let mut repaired = String::with_capacity(text.len() * 2);
    let mut pending: Vec<u8> = Vec::new();

    for c in text.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(byte) => pending.push(byte),
            Err(_) => {
                flush_cp1251(&mut pending, &mut repaired);
                repaired.push(c);
            }
        }
    }
    flush_cp1251(&mut pending, &mut repaired);
    repaired
}

fn flush_cp1251(pending: &mut Vec<u8>, out: &mut String) {
    if pending.is_empty() {
        return;
    }
    let (decoded, _) = WINDOWS_1251.decode_without_bom_handling(pending);
    out.push_str(&decoded);
    pending.clear();
}

/// Parse a float written with a comma as decimal separator (`"12,5"`).
///
/// A dot is accepted too. Blank input is rejected.
pub fn parse_comma_float(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Default dump file name stamped with the local time,
/// e.g. `DUMP_19_10_26_14-05-09.xlsx`.
pub fn dump_file_name(extension: &str) -> String {
    format!(
        "DUMP_{}.{}",
        Local::now().format("%d_%m_%y_%H-%M-%S"),
        extension
    )
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
