//! HTTP surface
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | POST | `/searchParts` | `{partType, searchTerm}` | `{results: [...]}` |
//! | POST | `/sendQuoteEmail` | `{quoteId, parts, estimatedTotal}` | `{success: true}` |
//! | GET | `/health` | | `{status: "ok"}` |
//!
//! Errors are returned as `{"error": {"status", "message"}}` with 400 for
//! `INVALID_ARGUMENT` and 500 for `INTERNAL`.

mod error;
mod routes;

pub use error::{ErrorBody, ErrorDetail};

use crate::config::{Config, ServerConfig};
use crate::fetch::build_fetcher;
use crate::handlers::{PartsSearchHandler, QuoteEmailHandler};
use crate::listing::ScraperMarkup;
use crate::quote::SmtpMailer;
use crate::secrets::{mail_credentials, SecretSource};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Errors raised while assembling or running the server
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to build listing parser: {0}")]
    Markup(#[from] crate::ExtractError),

    #[error("Failed to build mail transport: {0}")]
    Mail(#[from] crate::MailError),

    #[error("Invalid allowed origin: {0}")]
    Origin(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handlers shared by every request
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<PartsSearchHandler>,
    pub quote: Arc<QuoteEmailHandler>,
}

impl AppState {
    pub fn new(search: PartsSearchHandler, quote: QuoteEmailHandler) -> Self {
        Self {
            search: Arc::new(search),
            quote: Arc::new(quote),
        }
    }

    /// Wires the production collaborators from startup configuration
    pub fn from_config(config: &Config, secrets: &dyn SecretSource) -> Result<Self, StartupError> {
        let fetcher = build_fetcher(config, secrets)?;
        let markup = Arc::new(ScraperMarkup::new()?);
        let search = PartsSearchHandler::new(fetcher, markup, config.retailer.search_url.clone());

        let mailer = SmtpMailer::new(&config.mail, mail_credentials(config, secrets))?;
        let quote = QuoteEmailHandler::new(Arc::new(mailer), config.mail.recipient.clone());

        Ok(Self::new(search, quote))
    }
}

/// Builds the application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, StartupError> {
    Ok(Router::new()
        .route("/searchParts", post(routes::search_parts))
        .route("/sendQuoteEmail", post(routes::send_quote_email))
        .route("/health", get(routes::health))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// CORS for the configured origins; empty or `"*"` allows any origin
fn cors_layer(config: &ServerConfig) -> Result<CorsLayer, StartupError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    if config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| StartupError::Origin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

/// Binds the configured address and serves until the process is stopped
pub async fn serve(router: Router, config: &ServerConfig) -> Result<(), StartupError> {
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
