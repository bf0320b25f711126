//! Direct retailer fetches

use super::HtmlFetcher;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches pages straight from the retailer
#[derive(Debug, Clone)]
pub struct DirectFetcher {
    client: Client,
}

impl DirectFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HtmlFetcher for DirectFetcher {
    async fn fetch_html(&self, url: &str) -> FetchResult<String> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
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
            source,
        })
    }
}
