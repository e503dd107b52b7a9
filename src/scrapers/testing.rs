//! In-memory [`PageFetcher`] for tests.

use crate::error::ScrapeError;
use crate::scrapers::client::PageFetcher;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages and records every requested URL in order.
///
/// URLs without a registered page answer like the real site does for an
/// unpublished period: not found.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Result<String, u16>>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) if *status != 404 => Err(ScrapeError::UnexpectedResponse {
                url: url.to_string(),
                status: *status,
            }),
            _ => Err(ScrapeError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

/// Render a directory page linking each `(name, href)` pair.
pub fn directory_html(links: &[(&str, &str)]) -> String {
    let mut html = String::from("<html><body><table class=\"inf\">");
    for (name, href) in links {
        html.push_str(&format!("<tr><td><a href=\"{href}\">{name}</a></td></tr>"));
    }
    html.push_str("</table></body></html>");
    html
}

/// Render a detail page with `header_cells` marked header cells and the given data rows.
pub fn detail_html(header_cells: usize, rows: &[Vec<&str>]) -> String {
    let mut html = String::from("<html><body><table class=\"inf\"><tr>");
    for i in 0..header_cells {
        html.push_str(&format!("<td class=\"hd\">h{i}</td>"));
    }
    html.push_str("</tr>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></body></html>");
    html
}

/// Cells of a new-layout row; the remaining columns hold fixed valid values.
pub fn new_row<'a>(
    teacher: &'a str,
    group: &'a str,
    discipline: &'a str,
    total: &'a str,
) -> Vec<&'a str> {
    vec![
        "1", teacher, group, "1", discipline, "Lecture", total, "30", "28", "8,5", "4,0", "2",
        "25.12.2023", "",
    ]
}
