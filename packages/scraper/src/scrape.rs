//! Scrape orchestration.
//!
//! One run logs in, reads the unit metadata and last page index from
//! the landing page, then fetches pages 1..=last strictly in order,
//! accumulating the parsed ledger records. The first failed fetch or
//! malformed page aborts the run; records from earlier pages are
//! dropped with it.

use lokal_ledger_models::LedgerRecords;
use scraper::Html;

use crate::session::PortalClient;
use crate::{ScrapeError, landing, table};

/// Runs one full scrape and returns every collected record.
///
/// Issues one login request plus one request per page, sequentially.
///
/// # Errors
///
/// Returns the first [`ScrapeError`] encountered: transport failures,
/// a landing page without the active apartment link or paginator, or a
/// page whose ledger table is missing or malformed.
pub async fn scrape_all(
    client: &(impl PortalClient + ?Sized),
) -> Result<LedgerRecords, ScrapeError> {
    let body = client.login().await?;

    // Scoped so the non-Send DOM never lives across an await.
    let (apartment, last_page) = {
        let document = Html::parse_document(&body);
        (
            landing::apartment_info(&document)?,
            landing::last_page_index(&document)?,
        )
    };

    log::info!(
        "Scraping unit {} (type {}) across {last_page} page(s)",
        apartment.number,
        apartment.transaction_type
    );

    let mut records = LedgerRecords::default();

    for page in 1..=last_page {
        log::debug!("Fetching page {page}/{last_page}");

        let body = client.fetch_page(&apartment, page).await?;

        records.merge({
            let document = Html::parse_document(&body);
            table::parse_document(&document)?
        });
    }

    log::info!(
        "Scrape complete: {} income and {} outcome records",
        records.incomes.len(),
        records.outcomes.len()
    );

    Ok(records)
}
