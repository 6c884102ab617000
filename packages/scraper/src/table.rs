//! Transaction-table parsing.
//!
//! The portal renders the unit's ledger as a 7-column table identified
//! by its `summary` attribute. Column order is fixed: creation date,
//! outcome amount, income amount, max-payment date, document number,
//! description, and a preview cell whose first child anchor links to
//! the entry details.
//!
//! A row is classified by whichever amount cell parses as a number,
//! income first. Rows where neither amount parses contribute nothing.

use chrono::NaiveDate;
use lokal_ledger_models::{IncomeRecord, LedgerRecords, OutcomeRecord};
use scraper::{ElementRef, Html};

use crate::landing::element_text;
use crate::ScrapeError;

/// CSS selector identifying the ledger table.
const TABLE_SELECTOR: &str = "table[summary='Rozrachunki lokalu']";

/// Number of cells every ledger row carries.
const CELL_COUNT: usize = 7;

/// Date format the portal prints (`dd.mm.yyyy`).
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Locates the ledger table in a page and parses its rows.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] with `"Rows is missing"` when the
/// table or its rows are absent, and [`ScrapeError::Structure`] when a
/// row has the wrong shape.
pub fn parse_document(document: &Html) -> Result<LedgerRecords, ScrapeError> {
    let table_selector = crate::parse_selector(TABLE_SELECTOR)?;
    let row_selector = crate::parse_selector("tr")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(missing_rows)?;

    let rows: Vec<ElementRef<'_>> = table.select(&row_selector).collect();

    if rows.is_empty() {
        return Err(missing_rows());
    }

    parse_rows(&rows)
}

/// Converts a table's rows into income/outcome records, in row order.
///
/// Row 0 is the header and must have exactly [`CELL_COUNT`] cells; data
/// rows shorter than that fail the whole collection.
///
/// # Errors
///
/// Returns [`ScrapeError::Structure`] carrying the actual cell count
/// and raw cell texts.
pub fn parse_rows(rows: &[ElementRef<'_>]) -> Result<LedgerRecords, ScrapeError> {
    let cell_selector = crate::parse_selector("th, td")?;

    if let Some(header) = rows.first() {
        let cells: Vec<String> = header.select(&cell_selector).map(element_text).collect();

        if cells.len() != CELL_COUNT {
            return Err(wrong_cell_count(cells.len(), &cells));
        }
    }

    let mut records = LedgerRecords::default();

    for row in rows.iter().skip(1) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();

        if cells.len() < CELL_COUNT {
            let texts: Vec<String> = cells.iter().copied().map(element_text).collect();
            return Err(wrong_cell_count(cells.len(), &texts));
        }

        let created_at = parse_date(&element_text(cells[0]));
        let outcome = parse_amount(&element_text(cells[1]));
        let income = parse_amount(&element_text(cells[2]));

        // Income takes priority: the outcome cell is never consulted
        // for a row whose income cell already parsed.
        if let Some(income) = income {
            records.incomes.push(IncomeRecord {
                created_at,
                income,
                document_number: optional_text(cells[4]),
                description: optional_text(cells[5]),
            });
            continue;
        }

        if let Some(outcome) = outcome {
            records.outcomes.push(OutcomeRecord {
                created_at,
                outcome,
                max_payment_date: parse_date(&element_text(cells[3])),
                document_number: optional_text(cells[4]),
                description: optional_text(cells[5]),
                details_link: details_link(cells[6]),
            });
        }
    }

    Ok(records)
}

fn missing_rows() -> ScrapeError {
    ScrapeError::Parse("Rows is missing".to_owned())
}

fn wrong_cell_count(actual: usize, cells: &[String]) -> ScrapeError {
    ScrapeError::Structure {
        message: format!("Table row has {actual} cells instead of {CELL_COUNT}"),
        cells: Some(cells.join(",")),
    }
}

/// Parses an amount cell: trim, comma decimal separator to period,
/// then `f64`. `None` when the cell holds no valid number.
fn parse_amount(text: &str) -> Option<f64> {
    text.trim().replacen(',', ".", 1).parse().ok()
}

/// Parses a `dd.mm.yyyy` date cell. Unparseable dates are kept as
/// `None` on the record rather than failing the row.
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// A cell's text, or `None` when it is empty.
fn optional_text(cell: ElementRef<'_>) -> Option<String> {
    let text = element_text(cell);

    if text.is_empty() { None } else { Some(text) }
}

/// The href of the cell's first child, when that child is an anchor.
fn details_link(cell: ElementRef<'_>) -> Option<String> {
    let first = cell.child_elements().next()?;

    if first.value().name() != "a" {
        return None;
    }

    first.value().attr("href").map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<tr><th>Data</th><th>Obciążenia</th><th>Wpłaty</th>\
        <th>Termin płatności</th><th>Nr dokumentu</th><th>Opis</th><th>Podgląd</th></tr>";

    fn page(rows: &str) -> String {
        format!("<table summary=\"Rozrachunki lokalu\">{HEADER}{rows}</table>")
    }

    fn parse(html: &str) -> Result<LedgerRecords, ScrapeError> {
        parse_document(&Html::parse_document(html))
    }

    fn row(cells: [&str; 7]) -> String {
        let cells: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
        format!("<tr>{cells}</tr>")
    }

    #[test]
    fn missing_table_reports_rows_missing() {
        let err = parse("<p>session expired</p>").unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::Parse(message) if message == "Rows is missing"
        ));
    }

    #[test]
    fn header_with_wrong_cell_count_fails_structurally() {
        let err = parse(
            "<table summary=\"Rozrachunki lokalu\">\
             <tr><th>Data</th><th>Kwota</th><th>Opis</th></tr></table>",
        )
        .unwrap_err();

        match err {
            ScrapeError::Structure { message, cells } => {
                assert_eq!(message, "Table row has 3 cells instead of 7");
                assert_eq!(cells.as_deref(), Some("Data,Kwota,Opis"));
            }
            other => panic!("expected Structure error, got {other:?}"),
        }
    }

    #[test]
    fn short_data_row_fails_structurally() {
        let html = page("<tr><td>01.03.2024</td><td>50,00</td></tr>");
        let err = parse(&html).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::Structure { message, .. }
                if message == "Table row has 2 cells instead of 7"
        ));
    }

    #[test]
    fn income_row_yields_income_record() {
        let html = page(&row([
            "01.03.2024",
            "",
            "100,00",
            "",
            "FV/2024/03",
            "wpłata",
            "",
        ]));

        let records = parse(&html).unwrap();

        assert_eq!(records.incomes.len(), 1);
        assert!(records.outcomes.is_empty());

        let income = &records.incomes[0];
        assert!((income.income - 100.0).abs() < f64::EPSILON);
        assert_eq!(income.created_at, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(income.document_number.as_deref(), Some("FV/2024/03"));
        assert_eq!(income.description.as_deref(), Some("wpłata"));
    }

    #[test]
    fn income_takes_priority_when_both_amounts_parse() {
        let html = page(&row(["01.03.2024", "25,00", "100,00", "", "", "", ""]));

        let records = parse(&html).unwrap();

        assert_eq!(records.incomes.len(), 1);
        assert!(records.outcomes.is_empty());
    }

    #[test]
    fn outcome_row_yields_outcome_record_with_details_link() {
        let html = page(&row([
            "05.03.2024",
            "50,00",
            "",
            "10.03.2024",
            "N/2024/11",
            "naliczenie",
            "<a href=\"podglad.php?id=11\">podgląd</a>",
        ]));

        let records = parse(&html).unwrap();

        assert!(records.incomes.is_empty());
        assert_eq!(records.outcomes.len(), 1);

        let outcome = &records.outcomes[0];
        assert!((outcome.outcome - 50.0).abs() < f64::EPSILON);
        assert_eq!(outcome.created_at, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(outcome.max_payment_date, NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(outcome.details_link.as_deref(), Some("podglad.php?id=11"));
    }

    #[test]
    fn details_link_requires_anchor_first_child() {
        let html = page(&row([
            "05.03.2024",
            "50,00",
            "",
            "10.03.2024",
            "",
            "",
            "<span>brak</span>",
        ]));

        let records = parse(&html).unwrap();

        assert_eq!(records.outcomes[0].details_link, None);
    }

    #[test]
    fn row_with_no_parseable_amount_is_skipped() {
        let html = page(&row(["01.03.2024", "saldo", "", "", "", "", ""]));

        let records = parse(&html).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn unparseable_date_still_yields_a_record() {
        let html = page(&row(["wkrótce", "", "10,00", "", "", "", ""]));

        let records = parse(&html).unwrap();

        assert_eq!(records.incomes.len(), 1);
        assert_eq!(records.incomes[0].created_at, None);
    }

    #[test]
    fn amounts_accept_comma_and_period_separators() {
        assert_eq!(parse_amount("1,50"), Some(1.5));
        assert_eq!(parse_amount("1.50"), Some(1.5));
        assert_eq!(parse_amount("  100,00  "), Some(100.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("saldo"), None);
    }
}
