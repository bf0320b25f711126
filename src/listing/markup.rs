//! Listing node discovery with CSS selectors

use super::{MarkupParser, RawListing};
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Html, Selector};

const ITEM_CELL: &str = ".item-cell";
const ITEM_TITLE: &str = "a.item-title";
const ITEM_IMAGE: &str = "a.item-img img";
const PRICE_WHOLE: &str = ".price-current strong";
const PRICE_FRACTION: &str = ".price-current sup";

/// [`MarkupParser`] backed by `scraper`
///
/// # Selectors
///
/// | Fragment | Selector |
/// |----------|----------|
/// | listing node | `.item-cell` |
/// | title | `a.item-title` |
/// | image | `a.item-img img` (`src`) |
/// | whole price | `.price-current strong` |
/// | fractional price | `.price-current sup` |
///
/// Text fragments concatenate every match inside the node. The image comes
/// from the first match only.
#[derive(Debug, Clone)]
pub struct ScraperMarkup {
    item_cell: Selector,
    title: Selector,
    image: Selector,
    price_whole: Selector,
    price_fraction: Selector,
}

impl ScraperMarkup {
    pub fn new() -> ExtractResult<Self> {
        Ok(Self {
            item_cell: selector(ITEM_CELL)?,
            title: selector(ITEM_TITLE)?,
            image: selector(ITEM_IMAGE)?,
            price_whole: selector(PRICE_WHOLE)?,
            price_fraction: selector(PRICE_FRACTION)?,
        })
    }

    fn read_node(&self, node: ElementRef<'_>) -> RawListing {
        RawListing {
            title: text_of(node, &self.title),
            image: node
                .select(&self.image)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(str::to_string),
            price_whole: non_empty(text_of(node, &self.price_whole)),
            price_fraction: non_empty(text_of(node, &self.price_fraction)),
        }
    }
}

impl MarkupParser for ScraperMarkup {
    fn parse_listings(&self, html: &str) -> ExtractResult<Vec<RawListing>> {
        let document = Html::parse_document(html);

        // html5ever recovers from any input; only log what it complained about
        if !document.errors.is_empty() {
            tracing::trace!(
                "Listing page parsed with {} recoverable errors",
                document.errors.len()
            );
        }

        let nodes: Vec<RawListing> = document
            .select(&self.item_cell)
            .map(|node| self.read_node(node))
            .collect();

        tracing::debug!("Found {} listing nodes", nodes.len());
        Ok(nodes)
    }
}

fn selector(css: &str) -> ExtractResult<Selector> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Concatenated text of every element under `node` matching `selector`
fn text_of(node: ElementRef<'_>, selector: &Selector) -> String {
    node.select(selector)
        .flat_map(|element| element.text())
        .collect()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
