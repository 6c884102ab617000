#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch entry point for the lokal-ledger portal scraper.
//!
//! Wires configuration, HTTP session, and the scrape run together by
//! plain construction, runs the scrape exactly once, and reports the
//! outcome through the logger. This is the sole error boundary: a
//! failed run is logged at error level and the process still exits
//! cleanly.

use lokal_ledger_scraper::ScrapeError;
use lokal_ledger_scraper::config::ScrapeConfig;
use lokal_ledger_scraper::scrape;
use lokal_ledger_scraper::session::PortalSession;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(e) = run().await {
        log::error!("Scrape run failed: {e}");
    }
}

/// Builds the session from the environment and runs one scrape.
async fn run() -> Result<(), ScrapeError> {
    let config = ScrapeConfig::from_env()?;
    let session = PortalSession::new(config)?;

    let records = scrape::scrape_all(&session).await?;

    // Nothing downstream consumes the records yet; report the counts so
    // a run is at least observable. TODO: write the collected ledger to
    // CSV once the destination is decided.
    log::info!(
        "Collected {} income and {} outcome records",
        records.incomes.len(),
        records.outcomes.len()
    );

    Ok(())
}
