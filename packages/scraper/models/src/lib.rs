#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types produced by the lokal-ledger portal scraper.
//!
//! One scrape run yields a [`LedgerRecords`] holding the income and
//! outcome entries extracted from the unit's transaction-history table,
//! in row order within and across pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The unit number and transaction-type code taken from the active
/// navigation link on the portal's landing page.
///
/// Both values are raw substrings of the link's query string; every
/// paginated request is scoped by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentInfo {
    /// Transaction-type code (the `typobrotu=` query parameter).
    pub transaction_type: String,
    /// Unit number (the `lokal=` query parameter).
    pub number: String,
}

/// A ledger row whose income cell carried a valid amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    /// Booking date of the entry. `None` when the portal cell did not
    /// hold a parseable `dd.mm.yyyy` date.
    pub created_at: Option<NaiveDate>,
    /// Credited amount.
    pub income: f64,
    /// Document reference, when the cell was non-empty.
    pub document_number: Option<String>,
    /// Free-text description, when the cell was non-empty.
    pub description: Option<String>,
}

/// A ledger row whose outcome cell carried a valid amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
    /// Booking date of the entry. `None` when unparseable.
    pub created_at: Option<NaiveDate>,
    /// Charged amount.
    pub outcome: f64,
    /// Payment deadline. `None` when unparseable.
    pub max_payment_date: Option<NaiveDate>,
    /// Document reference, when the cell was non-empty.
    pub document_number: Option<String>,
    /// Free-text description, when the cell was non-empty.
    pub description: Option<String>,
    /// Href of the row's detail-preview link, when the row had one.
    pub details_link: Option<String>,
}

/// All records collected by one scrape run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecords {
    /// Income entries, in row order.
    pub incomes: Vec<IncomeRecord>,
    /// Outcome entries, in row order.
    pub outcomes: Vec<OutcomeRecord>,
}

impl LedgerRecords {
    /// Appends another page's records, preserving row order.
    pub fn merge(&mut self, other: Self) {
        self.incomes.extend(other.incomes);
        self.outcomes.extend(other.outcomes);
    }

    /// Total number of collected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incomes.len() + self.outcomes.len()
    }

    /// Returns `true` when no records were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
