//! HTTP access to the schedule site.
//!
//! The rest of the scrapers only see the [`PageFetcher`] trait, so that a
//! whole period can be scraped against canned pages in tests. The real
//! implementation, [`HttpFetcher`], wraps one `reqwest::Client` that is built
//! once per run and shared by every request (connection pool and cookies).
//!
//! # URL Pattern
//!
//! ```text
//! {base}/20{FROM}{TO}_{SEMESTER}/vp.htm     teacher directory
//! {base}/20{FROM}{TO}_{SEMESTER}/{href}     teacher detail page
//! ```

use crate::error::ScrapeError;
use crate::models::Period;
use crate::utils::latin1_from_bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

/// Source of raw page text.
///
/// Implementors return the body read one code point per byte (see
/// [`latin1_from_bytes`]) and map HTTP statuses onto [`ScrapeError`]:
/// 404 is [`ScrapeError::NotFound`], anything else but 200 is
/// [`ScrapeError::UnexpectedResponse`].
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Builds page URLs for a schedule site rooted at `base`.
#[derive(Debug, Clone)]
pub struct Site {
    base: String,
}

impl Site {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Root URL of one period, without a trailing slash.
    pub fn period_url(&self, period: &Period) -> String {
        format!("{}/{}", self.base, period.slug())
    }

    /// The period's teacher directory page.
    pub fn directory_url(&self, period: &Period) -> String {
        format!("{}/vp.htm", self.period_url(period))
    }

    /// Resolve a link found on the directory page against the period root.
    pub fn resolve(&self, period: &Period, href: &str) -> Result<String, ScrapeError> {
        let root = Url::parse(&format!("{}/", self.period_url(period)))?;
        Ok(root.join(href)?.to_string())
    }
}

/// [`PageFetcher`] backed by a shared `reqwest::Client`.
///
/// Every page is requested with an empty-bodied `POST`, the way the site
/// serves its generated tables.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.post(url).send().await?;
        let status = response.status();
        debug!(%status, "Received response");

        if status == StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound {
                url: url.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(ScrapeError::UnexpectedResponse {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Read response body");
        Ok(latin1_from_bytes(&bytes))
    }
}
