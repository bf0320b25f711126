//! HTML rendering for quote emails

use super::QuotePart;
use crate::RenderError;

const CELL_STYLE: &str = "padding: 8px; border-bottom: 1px solid #ddd;";
const HEAD_STYLE: &str = "padding: 8px; border-bottom: 2px solid #ddd;";
const FOOT_STYLE: &str = "padding-top: 10px; font-weight: bold;";

/// Renders the quote summary as an HTML document
///
/// One table row per part with its price to two decimals, and a footer row
/// with the total. Output depends only on the arguments.
///
/// # Errors
///
/// [`RenderError::NonNumericPrice`] if a part's price is not a JSON number, and
/// [`RenderError::NonFiniteTotal`] if the total is NaN or infinite.
///
/// # Example
///
/// ```
/// use pc_quote::quote::{render, QuotePart};
///
/// let html = render("Q1", &[QuotePart::new("GPU", 499.99)], 499.99).unwrap();
/// assert!(html.contains("GPU"));
/// assert!(html.contains("$499.99"));
/// ```
pub fn render(quote_id: &str, parts: &[QuotePart], total: f64) -> Result<String, RenderError> {
    if !total.is_finite() {
        return Err(RenderError::NonFiniteTotal(total));
    }

    let mut rows = String::new();
    for part in parts {
        let price = part
            .price
            .as_f64()
            .ok_or_else(|| RenderError::NonNumericPrice {
                name: part.name.clone(),
                price: part.price.to_string(),
            })?;

        rows.push_str(&format!(
            "\n    <tr>\n      <td style=\"{cell}\">{name}</td>\n      \
             <td style=\"{cell} text-align: right;\">{price}</td>\n    </tr>",
            cell = CELL_STYLE,
            name = escape_html(&part.name),
            price = format_price(price),
        ));
    }

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; color: #333;">
  <h2>New PC Build Quote Request</h2>
  <p><strong>Quote ID:</strong> {quote_id}</p>
  <table style="width: 100%; border-collapse: collapse;">
    <thead>
      <tr>
        <th style="{head} text-align: left;">Component</th>
        <th style="{head} text-align: right;">Price</th>
      </tr>
    </thead>
    <tbody>{rows}
    </tbody>
    <tfoot>
      <tr>
        <td style="{foot}">Estimated Total:</td>
        <td style="{foot} text-align: right;"><strong>{total}</strong></td>
      </tr>
    </tfoot>
  </table>
</div>
"#,
        quote_id = escape_html(quote_id),
        head = HEAD_STYLE,
        rows = rows,
        foot = FOOT_STYLE,
        total = format_price(total),
    );

    Ok(html)
}

/// Formats an amount as dollars with exactly two decimals
///
/// Exact half-cent amounts round away from zero, so `1.125` is `$1.13`.
pub fn format_price(amount: f64) -> String {
    // Only odd multiples of 1/8 sit exactly on a half cent
    let eighths = amount * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("${:.2}", (amount * 100.0).round() / 100.0);
    }
    format!("${:.2}", amount)
}

/// Escapes text for use in HTML content
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
