//! Error types for scraping and exporting.
//!
//! Scraping failures fall into three families:
//!
//! | Variant | Meaning | Policy |
//! |---------|---------|--------|
//! | [`ScrapeError::NotFound`] | The page does not exist (HTTP 404) | Skippable, retrospective mode only |
//! | [`ScrapeError::UnexpectedResponse`] | Any other non-200 status | Fatal |
//! | [`ScrapeError::MalformedRow`] / [`ScrapeError::MalformedPage`] | Markup or field parsing unexpected | Fatal |
//!
//! Nothing is retried. Errors bubble up unmodified except for the single
//! not-found downgrade performed by the retrospective aggregator.

use thiserror::Error;

/// Failure while fetching or decoding schedule pages.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The server answered 404: nothing is published at this URL.
    #[error("nothing published at {url}")]
    NotFound { url: String },

    /// The server answered with a status other than 200 or 404.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedResponse { url: String, status: u16 },

    /// A table row is missing a column or holds a non-numeric value where a
    /// number is expected. `cells` keeps the raw row texts for diagnostics.
    #[error("malformed row ({reason}): {cells:?}")]
    MalformedRow { reason: String, cells: Vec<String> },

    /// The page lacks the expected structure (result table, link target).
    #[error("malformed page at {url}: {reason}")]
    MalformedPage { url: String, reason: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ScrapeError {
    /// Turn a 404 into a fatal [`ScrapeError::UnexpectedResponse`].
    ///
    /// Used for teacher detail pages: only a missing directory page means
    /// "this period was never published".
    pub fn escalate_not_found(self) -> Self {
        match self {
            ScrapeError::NotFound { url } => ScrapeError::UnexpectedResponse { url, status: 404 },
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ScrapeError::NotFound { .. })
    }
}

/// Failure while writing export rows to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no rows to export")]
    Empty,

    #[error("cannot mix summary and detail rows in one export")]
    MixedRows,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalate_not_found() {
        let err = ScrapeError::NotFound {
            url: "https://example.com/2122_1/t1.htm".to_string(),
        }
        .escalate_not_found();

        match err {
            ScrapeError::UnexpectedResponse { url, status } => {
                assert_eq!(url, "https://example.com/2122_1/t1.htm");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_escalate_keeps_other_variants() {
        let err = ScrapeError::UnexpectedResponse {
            url: "u".to_string(),
            status: 500,
        }
        .escalate_not_found();
        assert!(matches!(err, ScrapeError::UnexpectedResponse { status: 500, .. }));
    }

    #[test]
    fn test_malformed_row_message_carries_cells() {
        let err = ScrapeError::MalformedRow {
            reason: "column 6 is not an integer".to_string(),
            cells: vec!["1".to_string(), "abc".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("column 6"));
        assert!(msg.contains("abc"));
    }
}
