//! Scrapes house price listings page by page and pivots the sales into a
//! date by address table written as CSV.

pub mod config;
mod error;
mod macros;
pub mod output;
pub mod parse;
pub mod pivot;
pub mod process;
pub mod record;
mod request;

pub use error::{Error, Result};
