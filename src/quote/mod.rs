//! Quote emails
//!
//! [`render`] builds the HTML summary of a quote; a [`MailTransport`] delivers
//! it. [`SmtpMailer`] is the production transport.

mod composer;
mod mailer;

pub use composer::{format_price, render};
pub use mailer::SmtpMailer;

use crate::MailResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of a quote as supplied by the caller
///
/// `price` is kept as raw JSON so that a non-numeric price reaches the
/// renderer and fails there instead of being rejected as a malformed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotePart {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Value,
}

impl QuotePart {
    pub fn new(name: &str, price: f64) -> Self {
        Self {
            name: name.to_string(),
            price: Value::from(price),
        }
    }
}

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Capability to deliver an email
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()>;
}

/// Subject line for a quote email
pub fn quote_subject(quote_id: &str) -> String {
    format!("New PC Build Quote Request - #{}", quote_id)
}
