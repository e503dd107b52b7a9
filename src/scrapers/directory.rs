//! Teacher directory scraper.
//!
//! Each period publishes a `vp.htm` page whose result table links every
//! teacher to their workload detail page. Links are returned in page order.

use crate::error::ScrapeError;
use crate::models::{Period, TeacherRef};
use crate::scrapers::client::{PageFetcher, Site};
use crate::scrapers::decoder::result_table;
use crate::utils::repair_cyrillic;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument};

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Fetch and parse the teacher directory of one period.
///
/// # Errors
///
/// [`ScrapeError::NotFound`] when the period has no published schedule,
/// [`ScrapeError::UnexpectedResponse`] for other failing statuses, and
/// [`ScrapeError::MalformedPage`] when the table or a link target is missing.
#[instrument(level = "info", skip(fetcher, site, period), fields(period = %period))]
pub async fn fetch_directory<F: PageFetcher>(
    fetcher: &F,
    site: &Site,
    period: &Period,
) -> Result<Vec<TeacherRef>, ScrapeError> {
    let url = site.directory_url(period);
    let html = fetcher.fetch(&url).await?;
    let teachers = parse_directory(&html, &url, site, period)?;

    info!(count = teachers.len(), %url, "Indexed teachers");
    Ok(teachers)
}

/// Extract every link of the result table as a [`TeacherRef`].
pub fn parse_directory(
    html: &str,
    url: &str,
    site: &Site,
    period: &Period,
) -> Result<Vec<TeacherRef>, ScrapeError> {
    let document = Html::parse_document(html);
    let table = result_table(&document, url)?;

    let mut teachers = Vec::new();
    for link in table.select(&LINK) {
        let full_name = repair_cyrillic(&link.text().collect::<String>())
            .trim()
            .to_string();
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MalformedPage {
                url: url.to_string(),
                reason: format!("link {full_name:?} has no href"),
            })?;
        let detail_url = site.resolve(period, href)?;
        debug!(%full_name, %detail_url, "Found teacher");

        teachers.push(TeacherRef {
            full_name,
            detail_url,
        });
    }
    Ok(teachers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Semester;

    fn directory_html(links: &[(&str, &str)]) -> String {
        let mut html = String::from(
            "<html><body><table><tr><td><a href=\"menu.htm\">Menu</a></td></tr></table>\
             <table class=\"inf\">",
        );
        for (name, href) in links {
            html.push_str(&format!("<tr><td><a href=\"{href}\">{name}</a></td></tr>"));
        }
        html.push_str("</table></body></html>");
        html
    }

    #[test]
    fn test_parse_directory_in_page_order() {
        let site = Site::new("https://schedule.example.edu");
        let period = Period::new(23, 24, Semester::First);
        let html = directory_html(&[
            ("\u{C8}\u{E2}\u{E0}\u{ED}\u{EE}\u{E2}", "v1.htm"),
            ("Petrov", "v2.htm"),
        ]);

        let teachers = parse_directory(&html, "u", &site, &period).unwrap();
        assert_eq!(
            teachers,
            vec![
                TeacherRef {
                    full_name: "Иванов".to_string(),
                    detail_url: "https://schedule.example.edu/202324_1/v1.htm".to_string(),
                },
                TeacherRef {
                    full_name: "Petrov".to_string(),
                    detail_url: "https://schedule.example.edu/202324_1/v2.htm".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_directory_ignores_links_outside_result_table() {
        let site = Site::new("https://schedule.example.edu");
        let period = Period::new(23, 24, Semester::First);
        let html = directory_html(&[("Petrov", "v2.htm")]);

        let teachers = parse_directory(&html, "u", &site, &period).unwrap();
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].full_name, "Petrov");
    }

    #[test]
    fn test_parse_directory_link_without_href() {
        let site = Site::new("https://schedule.example.edu");
        let period = Period::new(23, 24, Semester::First);
        let html = "<table class=\"inf\"><tr><td><a>Nobody</a></td></tr></table>";

        let err = parse_directory(html, "u", &site, &period).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPage { .. }));
    }

    #[test]
    fn test_parse_directory_missing_table() {
        let site = Site::new("https://schedule.example.edu");
        let period = Period::new(23, 24, Semester::First);

        let err = parse_directory("<p>maintenance</p>", "u", &site, &period).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPage { .. }));
    }
}
