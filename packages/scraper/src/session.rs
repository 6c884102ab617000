//! Authenticated HTTP session against the portal.
//!
//! The portal has no session cookie worth keeping: every request, login
//! and pagination alike, re-submits the login form. Pagination requests
//! additionally carry the `lokal` / `typobrotu` / `strona` query
//! parameters that scope the transaction table to one unit and page.

use lokal_ledger_models::ApartmentInfo;

use crate::ScrapeError;
use crate::config::ScrapeConfig;

/// Fetches portal pages as raw HTML text.
///
/// The orchestrator only sees this trait, so tests can substitute canned
/// pages for the live portal.
pub trait PortalClient {
    /// Submits the login form and returns the landing-page HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the request fails or the portal
    /// responds with a non-success status.
    fn login(&self) -> impl std::future::Future<Output = Result<String, ScrapeError>> + Send;

    /// Re-submits the login form with pagination query parameters and
    /// returns the requested page's HTML. `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the request fails or the portal
    /// responds with a non-success status.
    fn fetch_page(
        &self,
        apartment: &ApartmentInfo,
        page: u32,
    ) -> impl std::future::Future<Output = Result<String, ScrapeError>> + Send;
}

/// [`PortalClient`] backed by a [`reqwest::Client`] bound to the
/// configured base URL.
#[derive(Debug)]
pub struct PortalSession {
    /// Connection pool to the portal host.
    client: reqwest::Client,
    /// Base URL and credentials.
    config: ScrapeConfig,
}

impl PortalSession {
    /// Creates a session from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self { client, config })
    }

    /// The login endpoint: the base URL with a single trailing slash.
    fn endpoint(&self) -> String {
        format!("{}/", self.config.base_url.trim_end_matches('/'))
    }

    /// Form fields the portal expects on every request.
    fn auth_form(&self) -> [(&'static str, &str); 2] {
        [
            ("login", self.config.username.as_str()),
            ("pass", self.config.password.as_str()),
        ]
    }
}

impl PortalClient for PortalSession {
    async fn login(&self) -> Result<String, ScrapeError> {
        let response = self
            .client
            .post(self.endpoint())
            .form(&self.auth_form())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }

    async fn fetch_page(
        &self,
        apartment: &ApartmentInfo,
        page: u32,
    ) -> Result<String, ScrapeError> {
        let page = page.to_string();

        let response = self
            .client
            .post(self.endpoint())
            .query(&[
                ("lokal", apartment.number.as_str()),
                ("typobrotu", apartment.transaction_type.as_str()),
                ("strona", page.as_str()),
            ])
            .form(&self.auth_form())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
