use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Couldn't fetch a page: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Row {row} of {url} doesn't have the expected shape: {reason}")]
    StructuralMismatch {
        url: String,
        row: usize,
        reason: &'static str,
    },

    #[error("Row {row} of {url} has a date that couldn't be parsed: {text:?}")]
    DateParse { url: String, row: usize, text: String },

    #[error("Row {row} of {url} has an address that doesn't match `<designator> <number>, ...`: {address:?}")]
    FormatMismatch {
        url: String,
        row: usize,
        address: String,
    },

    #[error("The selector you are trying to scrape for is invalid. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
}
