use std::collections::HashSet;

use scraper::{html::Select, ElementRef, Html, Selector};
use url::Url;

use crate::record::{parse_date, SaleRecord};
use crate::{Error, Result};

/// Selectors for the listing markup. Built once per document.
pub struct Selectors {
    row: Selector,
    cell: Selector,
    emphasis: Selector,
    heading: Selector,
    pagination: Selector,
}

impl Selectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            row: create_selector(".searchresults tbody tr")?,
            cell: create_selector("td")?,
            emphasis: create_selector("strong")?,
            heading: create_selector("h2")?,
            pagination: create_selector(".paginate a")?,
        })
    }
}

/// Lazily yields one [`SaleRecord`] per row of the results table body.
///
/// A row that doesn't have exactly three cells, or is missing the `<strong>` date
/// or `<h2>` address, yields [`Error::StructuralMismatch`]. It is never skipped.
pub struct Records<'a> {
    rows: Select<'a, 'a>,
    selectors: &'a Selectors,
    source: &'a Url,
    row: usize,
}

pub fn extract_records<'a>(doc: &'a Html, selectors: &'a Selectors, source: &'a Url) -> Records<'a> {
    Records {
        rows: doc.select(&selectors.row),
        selectors,
        source,
        row: 0,
    }
}

impl Iterator for Records<'_> {
    type Item = Result<SaleRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.row += 1;
        Some(self.parse_row(row))
    }
}

impl Records<'_> {
    fn parse_row(&self, row: ElementRef<'_>) -> Result<SaleRecord> {
        let cells: Vec<_> = row.select(&self.selectors.cell).collect();
        let [date_cell, address_cell, price_cell] = cells[..] else {
            return Err(self.mismatch("expected exactly three cells"));
        };

        let date_text = date_cell
            .select(&self.selectors.emphasis)
            .next()
            .map(trimmed_text)
            .ok_or_else(|| self.mismatch("date cell has no <strong>"))?;
        let address = address_cell
            .select(&self.selectors.heading)
            .next()
            .map(trimmed_text)
            .ok_or_else(|| self.mismatch("address cell has no <h2>"))?;
        let price = trimmed_text(price_cell);

        if address.is_empty() {
            return Err(self.mismatch("address is empty"));
        }
        if price.is_empty() {
            return Err(self.mismatch("price is empty"));
        }

        let date = parse_date(&date_text).ok_or_else(|| Error::DateParse {
            url: self.source.to_string(),
            row: self.row,
            text: date_text.clone(),
        })?;

        Ok(SaleRecord {
            row: self.row,
            date,
            address,
            price,
        })
    }

    fn mismatch(&self, reason: &'static str) -> Error {
        Error::StructuralMismatch {
            url: self.source.to_string(),
            row: self.row,
            reason,
        }
    }
}

/// Distinct `href`s inside the pagination region, as written in the markup.
/// Only the document passed in is examined.
pub fn page_links(doc: &Html, selectors: &Selectors) -> HashSet<String> {
    doc.select(&selectors.pagination)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(String::from)
        .collect()
}

#[inline]
fn trimmed_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
