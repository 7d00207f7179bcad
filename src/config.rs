use std::path::PathBuf;

use url::Url;

use crate::Result;

pub const DEFAULT_ENDPOINT: &str = "http://www.primelocation.com/house-prices/";
const SEARCH_SOURCE: &str = "house-prices";
const SECTION: &str = "house-prices";
const VIEW_TYPE: &str = "list";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where the first listing page comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Start {
    /// Free-text terms submitted to the search form, joined with a single space.
    Search(Vec<String>),
    /// A listing page fetched directly.
    Listing(Url),
}

/// Everything a single run needs. Built once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    pub start: Start,
    pub endpoint: Url,
    pub search_source: String,
    pub section: String,
    pub view_type: String,
    pub user_agent: String,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub address_filter: Option<String>,
}

impl Config {
    pub fn new(start: Start) -> Result<Self> {
        Ok(Self {
            start,
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            search_source: SEARCH_SOURCE.into(),
            section: SECTION.into(),
            view_type: VIEW_TYPE.into(),
            user_agent: USER_AGENT.into(),
            output: None,
            address_filter: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_address_filter(mut self, pattern: Option<String>) -> Self {
        self.address_filter = pattern;
        self
    }

    /// Form fields POSTed to the search endpoint.
    pub(crate) fn search_form<'a>(&'a self, query: &'a str) -> [(&'static str, &'a str); 4] {
        [
            ("q", query),
            ("search_source", self.search_source.as_str()),
            ("section", self.section.as_str()),
            ("view_type", self.view_type.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_house_prices_search() {
        let config = Config::new(Start::Search(vec!["Tollington".into(), "Road".into()])).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert!(config.output.is_none());
        assert!(config.address_filter.is_none());
        assert_eq!(
            config.search_form("Tollington Road"),
            [
                ("q", "Tollington Road"),
                ("search_source", "house-prices"),
                ("section", "house-prices"),
                ("view_type", "list"),
            ]
        );
    }
}
