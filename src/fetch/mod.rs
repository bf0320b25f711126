//! Listing page retrieval
//!
//! A parts search needs exactly one page of retailer HTML. It can come straight
//! from the retailer ([`DirectFetcher`]) or through a scraping relay that fetches
//! the page on our behalf ([`RelayFetcher`]). Which one is used is decided once,
//! from the config, by [`build_fetcher`].

mod direct;
mod relay;

pub use direct::DirectFetcher;
pub use relay::RelayFetcher;

use crate::config::{Config, RetailerConfig};
use crate::secrets::{relay_api_key, SecretSource};
use crate::FetchResult;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Capability to retrieve the HTML body behind a URL
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    /// Fetches `url` and returns the response body
    ///
    /// Any non-success status is an error; the body of a failed response is
    /// discarded.
    async fn fetch_html(&self, url: &str) -> FetchResult<String>;
}

/// Builds an HTTP client for outbound page fetches
///
/// # Arguments
///
/// * `config` - The retailer configuration (user agent and timeout)
///
/// # Example
///
/// ```no_run
/// use pc_quote::config::RetailerConfig;
/// use pc_quote::fetch::build_http_client;
///
/// let client = build_http_client(&RetailerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RetailerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Selects the fetcher implementation named by the config
///
/// A `[relay]` section selects [`RelayFetcher`]; otherwise pages are fetched
/// directly.
pub fn build_fetcher(
    config: &Config,
    secrets: &dyn SecretSource,
) -> Result<Arc<dyn HtmlFetcher>, reqwest::Error> {
    let client = build_http_client(&config.retailer)?;

    match &config.relay {
        Some(relay) => {
            tracing::info!("Fetching listing pages through relay {}", relay.endpoint);
            let api_key = relay_api_key(config, secrets);
            Ok(Arc::new(RelayFetcher::new(
                client,
                relay.endpoint.clone(),
                api_key,
            )))
        }
        None => {
            tracing::info!("Fetching listing pages directly");
            Ok(Arc::new(DirectFetcher::new(client)))
        }
    }
}
