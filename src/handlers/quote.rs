use crate::quote::{quote_subject, render, MailTransport, OutgoingEmail, QuotePart};
use crate::ApiError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INVALID_QUOTE: &str = "Missing required data for sending email.";
const SEND_FAILED: &str = "Failed to send email.";

/// Payload of a quote email request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendQuoteEmailRequest {
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<QuotePart>>,
    #[serde(default)]
    pub estimated_total: Option<f64>,
}

/// Result of a delivered quote email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendQuoteEmailResponse {
    pub success: bool,
}

/// Renders quote summaries and mails them to the shop inbox
pub struct QuoteEmailHandler {
    transport: Arc<dyn MailTransport>,
    recipient: String,
}

impl QuoteEmailHandler {
    /// Creates a handler that sends every quote to `recipient`
    pub fn new(transport: Arc<dyn MailTransport>, recipient: impl Into<String>) -> Self {
        Self {
            transport,
            recipient: recipient.into(),
        }
    }

    /// Handles a decoded quote request
    ///
    /// A total of exactly zero is rejected as missing, the same as an absent
    /// total. An empty parts list is accepted.
    pub async fn handle(
        &self,
        request: SendQuoteEmailRequest,
    ) -> Result<SendQuoteEmailResponse, ApiError> {
        let quote_id = request.quote_id.filter(|id| !id.is_empty());
        let total = request.estimated_total.filter(|total| *total != 0.0);

        match (quote_id, request.parts, total) {
            (Some(quote_id), Some(parts), Some(total)) => {
                self.send(&quote_id, &parts, total).await
            }
            _ => Err(ApiError::InvalidArgument(INVALID_QUOTE.to_string())),
        }
    }

    /// Renders and sends one quote email
    ///
    /// # Errors
    ///
    /// [`ApiError::Internal`] if rendering or delivery fails. The cause is
    /// logged with the quote id.
    pub async fn send(
        &self,
        quote_id: &str,
        parts: &[QuotePart],
        total: f64,
    ) -> Result<SendQuoteEmailResponse, ApiError> {
        let html = match render(quote_id, parts, total) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error rendering email for {}: {}", quote_id, e);
                return Err(ApiError::Internal(SEND_FAILED.to_string()));
            }
        };

        let email = OutgoingEmail {
            to: self.recipient.clone(),
            subject: quote_subject(quote_id),
            html,
        };

        match self.transport.send(email).await {
            Ok(()) => {
                tracing::info!("Email sent for quote ID: {}", quote_id);
                Ok(SendQuoteEmailResponse { success: true })
            }
            Err(e) => {
                tracing::error!("Error sending email for {}: {}", quote_id, e);
                Err(ApiError::Internal(SEND_FAILED.to_string()))
            }
        }
    }
}
