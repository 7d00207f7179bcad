use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use houseprices::config::{Config, Start, DEFAULT_ENDPOINT};
use houseprices::{info_time, process::process_site, Result};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Write the CSV here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only keep sales whose address contains this text (case-sensitive)
    #[arg(short, long)]
    filter: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,

    /// Fetch this listing page directly instead of searching
    #[arg(long, conflicts_with = "terms")]
    url: Option<Url>,

    /// Search form endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Search terms, joined with spaces
    #[arg(required_unless_present = "url")]
    terms: Vec<String>,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let start = match self.url {
            Some(url) => Start::Listing(url),
            None => Start::Search(self.terms),
        };
        Ok(Config::new(start)?
            .with_endpoint(self.endpoint)
            .with_output(self.output)
            .with_address_filter(self.filter))
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let start_time = Local::now();
    let config = cli.into_config()?;
    process_site(&config).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
