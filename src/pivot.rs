use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::record::NormalizedRecord;

pub const DATE_LABEL: &str = "Date";
/// Written for (date, address) pairs that were never observed.
pub const MISSING: &str = "";
const DATE_FMT: &str = "%Y-%m-%d";

/// Sparse date -> address -> price mapping.
///
/// Nothing can be rendered until every record has been inserted, since the
/// column set depends on the whole input. Inserting the same (date, address)
/// pair twice keeps the later price.
#[derive(Debug, Default)]
pub struct PivotTable {
    addresses: BTreeSet<String>,
    prices: BTreeMap<NaiveDate, HashMap<String, String>>,
}

impl PivotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: NormalizedRecord) {
        self.addresses.insert(record.address.clone());
        self.prices
            .entry(record.date)
            .or_default()
            .insert(record.address, record.price);
    }

    #[cfg(test)]
    fn get(&self, date: NaiveDate, address: &str) -> Option<&str> {
        self.prices
            .get(&date)
            .and_then(|row| row.get(address))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `"Date"` followed by every address, ascending by string order.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(DATE_LABEL.to_string())
            .chain(self.addresses.iter().cloned())
            .collect()
    }

    /// Header first, then one dense row per date in ascending order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.prices.len() + 1);
        rows.push(self.header());

        for (date, prices) in &self.prices {
            let mut row = Vec::with_capacity(self.addresses.len() + 1);
            row.push(date.format(DATE_FMT).to_string());
            row.extend(self.addresses.iter().map(|address| {
                prices
                    .get(address)
                    .map_or(MISSING, String::as_str)
                    .to_string()
            }));
            rows.push(row);
        }
        rows
    }
}

impl Extend<NormalizedRecord> for PivotTable {
    fn extend<T: IntoIterator<Item = NormalizedRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<NormalizedRecord> for PivotTable {
    fn from_iter<T: IntoIterator<Item = NormalizedRecord>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, address: &str, price: &str) -> NormalizedRecord {
        NormalizedRecord {
            date: NaiveDate::parse_from_str(date, DATE_FMT).unwrap(),
            address: address.into(),
            price: price.into(),
        }
    }

    fn strings(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sparse_records_become_dense_rows() {
        let table: PivotTable = [
            record("2024-01-01", "Flat  1", "£100,000"),
            record("2024-01-02", "Flat  2", "£120,000"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            table.rows(),
            vec![
                strings(&["Date", "Flat  1", "Flat  2"]),
                strings(&["2024-01-01", "£100,000", ""]),
                strings(&["2024-01-02", "", "£120,000"]),
            ]
        );
    }

    #[test]
    fn later_record_overwrites_earlier() {
        let table: PivotTable = [
            record("2024-01-01", "Flat  1", "£100,000"),
            record("2024-01-01", "Flat  1", "£105,000"),
        ]
        .into_iter()
        .collect();

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(table.get(date, "Flat  1"), Some("£105,000"));
        assert_eq!(
            table.rows(),
            vec![strings(&["Date", "Flat  1"]), strings(&["2024-01-01", "£105,000"])]
        );
    }

    #[test]
    fn columns_sort_as_strings_and_rows_by_date() {
        let table: PivotTable = [
            record("2024-03-01", "Flat 2", "c"),
            record("2023-12-31", "Flat 10", "a"),
            record("2024-01-15", "Flat 2", "b"),
            record("2024-01-15", "Apartment  9", "d"),
        ]
        .into_iter()
        .collect();

        let rows = table.rows();
        assert_eq!(rows[0], strings(&["Date", "Apartment  9", "Flat 10", "Flat 2"]));
        let dates: Vec<_> = rows[1..].iter().map(|r| r[0].as_str()).collect();
        assert_eq!(dates, ["2023-12-31", "2024-01-15", "2024-03-01"]);
        assert_eq!(rows[2], strings(&["2024-01-15", "d", "", "b"]));
        assert!(rows.iter().all(|r| r.len() == 4));
    }

    #[test]
    fn empty_table_is_header_only() {
        let table = PivotTable::new();
        assert!(table.is_empty());
        assert_eq!(table.rows(), vec![strings(&["Date"])]);
    }
}
