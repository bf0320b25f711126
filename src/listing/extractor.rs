//! Record acceptance rules and id construction

use super::{ComponentRecord, RawListing};

/// Longest normalized name kept in a record id, in characters
const MAX_ID_NAME_CHARS: usize = 20;

/// Builds records from raw listing nodes
///
/// A node is skipped when its trimmed title is empty or its price is missing,
/// unparsable, or not positive. Skipped nodes still consume an index, so the
/// indices embedded in ids follow node position, not output position.
pub fn extract_records(nodes: &[RawListing], category: &str) -> Vec<ComponentRecord> {
    let mut records = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        let name = node.title.trim();
        if name.is_empty() {
            tracing::trace!("Skipping listing {}: no title", index);
            continue;
        }

        let price = match parse_price(node.price_whole.as_deref(), node.price_fraction.as_deref())
        {
            Some(price) => price,
            None => {
                tracing::trace!("Skipping listing {} ({}): no usable price", index, name);
                continue;
            }
        };

        records.push(ComponentRecord {
            id: format!("{}-{}-{}", category, normalize_name(name), index),
            name: name.to_string(),
            price,
            image: node.image.clone(),
        });
    }

    records
}

/// Normalizes a display name for use inside an id
///
/// Lower-cases, replaces each whitespace run with a single hyphen, and keeps at
/// most the first 20 characters.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                normalized.push('-');
            }
            in_whitespace = true;
        } else {
            normalized.push(c);
            in_whitespace = false;
        }
    }

    normalized.chars().take(MAX_ID_NAME_CHARS).collect()
}

/// Parses a price split across a whole and a fractional fragment
///
/// The fragments are joined as text and then parsed, so `"1,234"` and `".56"`
/// give `1234.56`. Returns `None` if either fragment is missing or blank, or if
/// the result is not a finite number above zero.
pub fn parse_price(whole: Option<&str>, fraction: Option<&str>) -> Option<f64> {
    let whole = whole.filter(|s| !s.is_empty())?;
    let fraction = fraction.filter(|s| !s.is_empty())?;

    let joined: String = format!("{}{}", whole, fraction)
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let price = joined.parse::<f64>().ok()?;
    if price.is_finite() && price > 0.0 {
        Some(price)
    } else {
        None
    }
}
