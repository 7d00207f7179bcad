use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::Result;

/// A retrieved document together with the location it was finally served from.
pub(crate) struct Fetched {
    pub url: Url,
    pub html: String,
}

pub(crate) fn build_client(config: &Config) -> Result<Client> {
    Ok(Client::builder().user_agent(&config.user_agent).build()?)
}

/// Requests a listing page and returns its HTML. Any non-2xx status is an error.
pub(crate) async fn request_page_html(client: &Client, url: Url) -> Result<Fetched> {
    debug!(%url, "GET");
    let res = client.get(url).send().await?;
    into_fetched(res).await
}

/// Submits the search form and returns the results page it lands on.
pub(crate) async fn request_search(client: &Client, config: &Config, query: &str) -> Result<Fetched> {
    debug!(endpoint = %config.endpoint, query, "POST");
    let res = client
        .post(config.endpoint.clone())
        .form(&config.search_form(query))
        .send()
        .await?;
    into_fetched(res).await
}

async fn into_fetched(res: Response) -> Result<Fetched> {
    let res = res.error_for_status()?;
    let url = res.url().clone();
    let html = res.text().await?;
    debug!(%url, bytes = html.len(), "fetched");
    Ok(Fetched { url, html })
}
