//! Landing-page parsing.
//!
//! The authenticated landing page carries two things the scrape needs:
//! the active transaction-type link (whose href holds the unit number
//! and transaction-type code) and the paginator (whose second-to-last
//! child is the last numbered page, one before the trailing "next"
//! control).

use lokal_ledger_models::ApartmentInfo;
use scraper::{ElementRef, Html};

use crate::ScrapeError;

/// Query-string marker preceding the unit number.
const APARTMENT_NUMBER_PART: &str = "lokal=";

/// Query-string marker preceding the transaction-type code.
const APARTMENT_TYPE_PART: &str = "typobrotu=";

/// Extracts the unit number and transaction-type code from the active
/// apartment-type link.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] when the landing page has no active
/// anchor inside the apartment-type selector.
pub fn apartment_info(document: &Html) -> Result<ApartmentInfo, ScrapeError> {
    let selector = crate::parse_selector("div#typy_obrotu a.active")?;

    let anchor = document.select(&selector).next().ok_or_else(|| {
        ScrapeError::Parse("Anchor Element for Apartment Number not found".to_owned())
    })?;

    let href = anchor.value().attr("href").unwrap_or_default();

    Ok(ApartmentInfo {
        transaction_type: value_after(href, APARTMENT_TYPE_PART),
        number: value_between(href, APARTMENT_NUMBER_PART),
    })
}

/// Reads the last page index from the paginator: the text of its
/// second-to-last child element, parsed as an integer.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] when the paginator is absent, has
/// fewer than two children, or the page text is not a number.
pub fn last_page_index(document: &Html) -> Result<u32, ScrapeError> {
    let selector = crate::parse_selector("div#stronnicowanie")?;

    let paginator = document
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::Parse("Paginator div#stronnicowanie not found".to_owned()))?;

    let children: Vec<ElementRef<'_>> = paginator.child_elements().collect();

    let last_page = children
        .len()
        .checked_sub(2)
        .and_then(|index| children.get(index))
        .ok_or_else(|| ScrapeError::Parse("Paginator has no page entries".to_owned()))?;

    let text = element_text(*last_page);

    text.parse()
        .map_err(|_| ScrapeError::Parse(format!("Last page index '{text}' is not a number")))
}

/// Collects an element's text content, trimmed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("").trim().to_owned()
}

/// The remainder of `href` after `marker`, or empty when absent.
fn value_after(href: &str, marker: &str) -> String {
    href.find(marker)
        .map_or_else(String::new, |index| href[index + marker.len()..].to_owned())
}

/// The substring of `href` between `marker` and the next `&`, or empty
/// when the marker is absent.
fn value_between(href: &str, marker: &str) -> String {
    href.find(marker).map_or_else(String::new, |index| {
        let rest = &href[index + marker.len()..];
        rest.split('&').next().unwrap_or_default().to_owned()
    })
}
