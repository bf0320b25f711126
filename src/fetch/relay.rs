//! Fetches through a scraping relay
//!
//! The relay is called as `GET {endpoint}?api_key=<key>&url=<target>` and
//! answers with the rendered page body of `target`.

use super::HtmlFetcher;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Fetches pages by asking a relay service to retrieve them
#[derive(Clone)]
pub struct RelayFetcher {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RelayFetcher {
    pub fn new(client: Client, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Builds the relay request URL for a target page
    pub fn relay_url(&self, target: &str) -> FetchResult<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::MissingCredential("relay API key".to_string()))?;

        Ok(Url::parse_with_params(
            &self.endpoint,
            &[("api_key", api_key), ("url", target)],
        )?)
    }
}

impl std::fmt::Debug for RelayFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayFetcher")
            .field("endpoint", &self.endpoint)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

#[async_trait]
impl HtmlFetcher for RelayFetcher {
    async fn fetch_html(&self, url: &str) -> FetchResult<String> {
        // The relay URL carries the API key; errors keep only the target URL
        let relay_url = self.relay_url(url)?;
        tracing::debug!("GET {} via relay {}", url, self.endpoint);

        let response = self
            .client
            .get(relay_url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source: source.without_url(),
        })
    }
}
