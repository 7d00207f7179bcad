use std::collections::{BTreeSet, HashSet};

use chrono::Local;
use reqwest::Client;
use scraper::Html;
use tokio::task::spawn_blocking;
use tracing::{debug, info};
use url::Url;

use crate::config::{Config, Start};
use crate::output::write_output;
use crate::parse::{extract_records, page_links, Selectors};
use crate::pivot::PivotTable;
use crate::record::{filter_records, normalize_records, NormalizedRecord};
use crate::request::{build_client, request_page_html, request_search, Fetched};
use crate::{info_time, Result};

/// What a single page contributes: its filtered, normalized records and,
/// for the first page only, the pagination references it holds.
struct ParsedPage {
    records: Vec<NormalizedRecord>,
    links: HashSet<String>,
}

/// Runs the whole pipeline and writes the pivot to the configured destination.
/// Nothing is written unless every page was fetched and parsed.
pub async fn process_site(config: &Config) -> Result<()> {
    let start_time = Local::now();
    let table = scrape_site(config).await?;

    if table.is_empty() {
        info!("No sales found, writing the header only");
    }
    let rows = table.rows();
    write_output(config.output.as_deref(), &rows)?;
    info_time!(
        start_time,
        "Wrote {} date rows and {} address columns",
        rows.len() - 1,
        rows[0].len() - 1
    );

    Ok(())
}

/// Fetches the first page, then every page its pagination region links to, one
/// after another, folding all records into a single [`PivotTable`].
///
/// Pagination is only read from the first page.
pub async fn scrape_site(config: &Config) -> Result<PivotTable> {
    let start_time = Local::now();
    let client = build_client(config)?;
    let filter = config.address_filter.clone();

    let first = request_first(&client, config).await?;
    info_time!("Fetched first page: {}", first.url);

    let first_url = first.url.clone();
    let page = parse_page(first, filter.clone(), true).await?;
    let links = resolve_links(&first_url, page.links)?;
    debug!(records = page.records.len(), pages = links.len(), "parsed first page");

    let mut table = PivotTable::new();
    table.extend(page.records);

    for url in links {
        let fetched = request_page_html(&client, url).await?;
        let page_url = fetched.url.clone();
        let page = parse_page(fetched, filter.clone(), false).await?;
        debug!(url = %page_url, records = page.records.len(), "parsed page");
        table.extend(page.records);
    }

    info_time!(start_time, "Finished scraping all pages");
    Ok(table)
}

async fn request_first(client: &Client, config: &Config) -> Result<Fetched> {
    match &config.start {
        Start::Search(terms) => request_search(client, config, &terms.join(" ")).await,
        Start::Listing(url) => request_page_html(client, url.clone()).await,
    }
}

/// Parses the document off the async runtime. Extraction, filtering and
/// normalization are chained lazily and only collected here, at the page boundary.
async fn parse_page(fetched: Fetched, filter: Option<String>, discover: bool) -> Result<ParsedPage> {
    spawn_blocking(move || -> Result<ParsedPage> {
        let Fetched { url, html } = fetched;
        let doc = Html::parse_document(&html);
        let selectors = Selectors::new()?;

        let records = normalize_records(
            filter_records(extract_records(&doc, &selectors, &url), filter.as_deref()),
            &url,
        )
        .collect::<Result<Vec<_>>>()?;

        let links = if discover {
            page_links(&doc, &selectors)
        } else {
            HashSet::new()
        };

        Ok(ParsedPage { records, links })
    })
    .await?
}

/// Resolves references against the page they came from, dropping the page itself.
/// Fragments are discarded, so `#top` style anchors count as the page they sit on.
fn resolve_links(source: &Url, links: HashSet<String>) -> Result<BTreeSet<Url>> {
    let mut this_page = source.clone();
    this_page.set_fragment(None);

    let mut resolved = BTreeSet::new();
    for link in links {
        let mut url = source.join(&link)?;
        url.set_fragment(None);
        if url != this_page {
            resolved.insert(url);
        }
    }
    Ok(resolved)
}
