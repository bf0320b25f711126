//! PC-Quote: parts search and quote mailing backend
//!
//! This crate serves two request operations over HTTP: searching a retailer's
//! listing page for PC components, and emailing a summary of a selected build
//! with its estimated total.

pub mod config;
pub mod fetch;
pub mod handlers;
pub mod listing;
pub mod quote;
pub mod secrets;
pub mod server;

use thiserror::Error;

/// Errors surfaced to callers of the two request operations
///
/// Only these two kinds ever leave the service. Downstream causes are logged
/// where they happen and replaced by a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Wire status name for this error kind
    pub fn status(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    /// The caller-facing message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidArgument(message) | ApiError::Internal(message) => message,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while retrieving a listing page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Missing relay credential: {0}")]
    MissingCredential(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),
}

/// Errors raised while turning a listing page into records
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("HTML parse error: {0}")]
    HtmlParse(String),
}

/// Errors raised while rendering a quote email
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("Price of part '{name}' is not a number: {price}")]
    NonNumericPrice { name: String, price: String },

    #[error("Total is not a finite number: {0}")]
    NonFiniteTotal(f64),
}

/// Errors raised by the outbound mail transport
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Missing mail credentials: {0}")]
    MissingCredentials(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for mail operations
pub type MailResult<T> = std::result::Result<T, MailError>;

// Re-export commonly used types
pub use config::Config;
pub use handlers::{PartsSearchHandler, QuoteEmailHandler};
pub use listing::{extract, ComponentRecord};
pub use quote::render;
