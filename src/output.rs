use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::Result;

/// Writes `rows` as CSV. Missing cells are already empty strings, so they become empty fields.
pub fn write_rows<W: Write>(writer: W, rows: &[Vec<String>]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes to the file at `path`, or to stdout when there is none.
pub fn write_output(path: Option<&Path>, rows: &[Vec<String>]) -> Result<()> {
    match path {
        Some(path) => write_rows(File::create(path)?, rows),
        None => write_rows(io::stdout().lock(), rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quotes_fields_with_commas_and_keeps_empty_cells() {
        let rows = vec![
            strings(&["Date", "Flat  1", "Flat  2"]),
            strings(&["2024-01-01", "£100,000", ""]),
        ];
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Date,Flat  1,Flat  2\n2024-01-01,\"£100,000\",\n"
        );
    }

    #[test]
    fn output_round_trips_through_a_reader() {
        let rows = vec![
            strings(&["Date", "Flat  1", "Flat 10"]),
            strings(&["2024-01-01", "£100,000", ""]),
            strings(&["2024-01-02", "", "\"POA\""]),
        ];
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();

        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        let body: Vec<Vec<String>> = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();

        assert_eq!(header, rows[0]);
        assert_eq!(body, rows[1..]);
    }
}
