use chrono::NaiveDate;
use url::Url;

use crate::{Error, Result};

/// Formats tried in order once ordinal suffixes ("12th") are stripped.
const DATE_FORMATS: [&str; 4] = ["%d %b %Y", "%d %B %Y", "%Y-%m-%d", "%d/%m/%Y"];

/// A single sale as it appears on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    /// 1-based position in the results table body it was read from.
    pub row: usize,
    pub date: NaiveDate,
    pub address: String,
    /// Kept verbatim, currency symbol and separators included.
    pub price: String,
}

/// A sale whose address has been replaced by its grouping key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub date: NaiveDate,
    pub address: String,
    pub price: String,
}

impl SaleRecord {
    pub fn new(row: usize, date: NaiveDate, address: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            row,
            date,
            address: address.into(),
            price: price.into(),
        }
    }

    /// Case-sensitive substring match on the raw address. No pattern matches everything.
    pub fn matches(&self, pattern: Option<&str>) -> bool {
        pattern.is_none_or(|p| self.address.contains(p))
    }

    /// Replaces the address with its grouping key. `source` is the page the
    /// record came from and only ends up in the error.
    pub fn normalize(self, source: &Url) -> Result<NormalizedRecord> {
        let Some(address) = normalize_address(&self.address) else {
            return Err(Error::FormatMismatch {
                url: source.to_string(),
                row: self.row,
                address: self.address,
            });
        };
        Ok(NormalizedRecord {
            date: self.date,
            address,
            price: self.price,
        })
    }
}

/// Turns `"Flat 1, Main St"` into `"Flat  1"`: the part before the first comma,
/// re-rendered as designator and number with the number right-aligned to width 2.
/// `None` unless that part is exactly two words.
pub fn normalize_address(address: &str) -> Option<String> {
    let head = address.split_once(',').map_or(address, |(head, _)| head);
    match head.split_whitespace().collect::<Vec<_>>()[..] {
        [designator, number] => Some(format!("{designator} {number:>2}")),
        _ => None,
    }
}

/// Drops records whose address doesn't contain `pattern`. Errors pass through untouched.
pub fn filter_records<'a, I>(
    records: I,
    pattern: Option<&'a str>,
) -> impl Iterator<Item = Result<SaleRecord>> + 'a
where
    I: IntoIterator<Item = Result<SaleRecord>>,
    I::IntoIter: 'a,
{
    records.into_iter().filter(move |record| match record {
        Ok(record) => record.matches(pattern),
        Err(_) => true,
    })
}

pub fn normalize_records<'a, I>(
    records: I,
    source: &'a Url,
) -> impl Iterator<Item = Result<NormalizedRecord>> + 'a
where
    I: IntoIterator<Item = Result<SaleRecord>>,
    I::IntoIter: 'a,
{
    records
        .into_iter()
        .map(move |record| record.and_then(|record| record.normalize(source)))
}

/// Parses the date cell text. Returns `None` for anything outside [`DATE_FORMATS`].
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let cleaned = text
        .split_whitespace()
        .map(strip_ordinal)
        .collect::<Vec<_>>()
        .join(" ");

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}

#[inline]
fn strip_ordinal(token: &str) -> &str {
    let digits = token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = token[digits.len()..].to_ascii_lowercase();
    let is_ordinal = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(suffix.as_str(), "st" | "nd" | "rd" | "th");

    if is_ordinal {
        digits
    } else {
        token
    }
}
