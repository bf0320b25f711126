//! Listing extraction
//!
//! Turns a retailer search page into [`ComponentRecord`]s. The work is split in
//! two so the record policy can be tested without real markup:
//!
//! - [`MarkupParser`] walks the document and pulls the raw text fragments out of
//!   each listing node ([`ScraperMarkup`] does this with CSS selectors)
//! - [`extract_records`] applies the acceptance rules and builds ids

mod extractor;
mod markup;

pub use extractor::{extract_records, normalize_name, parse_price};
pub use markup::ScraperMarkup;

use crate::ExtractResult;
use serde::{Deserialize, Serialize};

/// One extracted listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// `{category}-{normalized name}-{node index}`
    pub id: String,

    /// Trimmed display name, never empty
    pub name: String,

    /// Price, always greater than zero
    pub price: f64,

    /// Image URL exactly as it appeared in the markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Raw fragments of one listing node, before any validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawListing {
    /// Text of the title element, untrimmed
    pub title: String,

    /// Image source attribute, if the node has an image
    pub image: Option<String>,

    /// Whole-number part of the price, e.g. `"1,234"`
    pub price_whole: Option<String>,

    /// Fractional part of the price, e.g. `".56"`
    pub price_fraction: Option<String>,
}

/// Capability to locate listing nodes in a page
pub trait MarkupParser: Send + Sync {
    /// Returns one [`RawListing`] per listing node, in document order
    fn parse_listings(&self, html: &str) -> ExtractResult<Vec<RawListing>>;
}

/// Extracts records from a listing page using the default markup parser
///
/// # Example
///
/// ```
/// use pc_quote::listing::extract;
///
/// let html = r#"<div class="item-cell">
///     <a class="item-title">AMD Ryzen 7</a>
///     <li class="price-current"><strong>289</strong><sup>.99</sup></li>
/// </div>"#;
/// let records = extract(html, "cpu").unwrap();
/// assert_eq!(records[0].id, "cpu-amd-ryzen-7-0");
/// assert_eq!(records[0].price, 289.99);
/// ```
pub fn extract(html: &str, category: &str) -> ExtractResult<Vec<ComponentRecord>> {
    extract_with(&ScraperMarkup::new()?, html, category)
}

/// Extracts records from a listing page using the given markup parser
pub fn extract_with(
    parser: &dyn MarkupParser,
    html: &str,
    category: &str,
) -> ExtractResult<Vec<ComponentRecord>> {
    let nodes = parser.parse_listings(html)?;
    Ok(extract_records(&nodes, category))
}
