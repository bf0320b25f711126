use crate::fetch::HtmlFetcher;
use crate::listing::{extract_with, ComponentRecord, MarkupParser};
use crate::ApiError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INVALID_SEARCH: &str = "The function must be called with \"partType\" and \"searchTerm\".";
const SEARCH_FAILED: &str = "Failed to fetch parts data.";

/// Payload of a parts search
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPartsRequest {
    #[serde(default)]
    pub part_type: Option<String>,
    #[serde(default)]
    pub search_term: Option<String>,
}

/// Result of a parts search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPartsResponse {
    pub results: Vec<ComponentRecord>,
}

/// Searches the retailer for components
pub struct PartsSearchHandler {
    fetcher: Arc<dyn HtmlFetcher>,
    markup: Arc<dyn MarkupParser>,
    search_url: String,
}

impl PartsSearchHandler {
    /// Creates a handler that appends encoded queries to `search_url`
    pub fn new(
        fetcher: Arc<dyn HtmlFetcher>,
        markup: Arc<dyn MarkupParser>,
        search_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            markup,
            search_url: search_url.into(),
        }
    }

    /// Handles a decoded search request
    pub async fn handle(
        &self,
        request: SearchPartsRequest,
    ) -> Result<SearchPartsResponse, ApiError> {
        let part_type = request.part_type.unwrap_or_default();
        let search_term = request.search_term.unwrap_or_default();
        self.search(&part_type, &search_term).await
    }

    /// Fetches one listing page for `part_type` + `search_term` and extracts it
    ///
    /// # Errors
    ///
    /// * [`ApiError::InvalidArgument`] if either argument is empty; nothing is fetched
    /// * [`ApiError::Internal`] for any fetch or extraction failure
    pub async fn search(
        &self,
        part_type: &str,
        search_term: &str,
    ) -> Result<SearchPartsResponse, ApiError> {
        if part_type.is_empty() || search_term.is_empty() {
            return Err(ApiError::InvalidArgument(INVALID_SEARCH.to_string()));
        }

        let url = build_search_url(&self.search_url, part_type, search_term);

        let html = match self.fetcher.fetch_html(&url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error during scraping: {}", e);
                return Err(ApiError::Internal(SEARCH_FAILED.to_string()));
            }
        };

        let results = match extract_with(self.markup.as_ref(), &html, part_type) {
            Ok(results) => results,
            Err(e) => {
                tracing::error!("Error during scraping: {}", e);
                return Err(ApiError::Internal(SEARCH_FAILED.to_string()));
            }
        };

        tracing::info!(
            "Search '{} {}' returned {} results",
            part_type,
            search_term,
            results.len()
        );
        Ok(SearchPartsResponse { results })
    }
}

/// Builds the retailer search URL for a part type and search term
///
/// The two are joined with a space and percent-encoded as a single query.
///
/// # Example
///
/// ```
/// use pc_quote::handlers::build_search_url;
///
/// let url = build_search_url("https://www.newegg.com/p/pl?d=", "cpu", "ryzen 7");
/// assert_eq!(url, "https://www.newegg.com/p/pl?d=cpu%20ryzen%207");
/// ```
pub fn build_search_url(search_url: &str, part_type: &str, search_term: &str) -> String {
    let query = format!("{} {}", part_type, search_term);
    format!("{}{}", search_url, urlencoding::encode(&query))
}
