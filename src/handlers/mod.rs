//! Request handlers
//!
//! Each handler validates its payload, performs one external call, and maps
//! every downstream failure to an opaque [`ApiError::Internal`](crate::ApiError).
//! Handlers hold their collaborators, so tests can swap in fakes.

mod quote;
mod search;

pub use quote::{QuoteEmailHandler, SendQuoteEmailRequest, SendQuoteEmailResponse};
pub use search::{build_search_url, PartsSearchHandler, SearchPartsRequest, SearchPartsResponse};
