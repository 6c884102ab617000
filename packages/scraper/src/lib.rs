#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Scraping library for the property-management portal.
//!
//! Logs into the portal, reads the unit metadata and page count from the
//! landing page, then walks the paginated transaction-history table and
//! extracts income/outcome ledger entries into
//! [`lokal_ledger_models::LedgerRecords`].
//!
//! The crate is split along the scrape pipeline: [`config`] reads the
//! environment, [`session`] owns the authenticated HTTP client,
//! [`landing`] and [`table`] parse the two page shapes, and [`scrape`]
//! drives the whole run.

pub mod config;
pub mod landing;
pub mod scrape;
pub mod session;
pub mod table;

use scraper::Selector;

pub use lokal_ledger_models::LedgerRecords;

/// Errors that can occur during a scrape run.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Required configuration is missing or malformed. Fatal at startup.
    #[error("Configuration error: {message}")]
    Config {
        /// Which value was rejected and why.
        message: String,
    },

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An expected element, table, or row set was absent from a page.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A table row did not have the expected shape.
    #[error("Structure error: {message}")]
    Structure {
        /// What was malformed, including the actual cell count.
        message: String,
        /// Raw cell texts joined with commas, for diagnostics.
        cells: Option<String>,
    },
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{selector}': {e}")))
}
