//! Configuration module for PC-Quote
//!
//! This module handles loading, parsing, and validating the TOML startup
//! configuration. The loaded [`Config`] is read-only for the life of the process
//! and is handed to each handler when it is constructed.
//!
//! # Example
//!
//! ```no_run
//! use pc_quote::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Listening on {}", config.server.bind_address);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, MailConfig, RelayConfig, RetailerConfig, ServerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
