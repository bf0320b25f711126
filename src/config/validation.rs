use crate::config::types::{Config, MailConfig, RelayConfig, RetailerConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_retailer_config(&config.retailer)?;
    if let Some(relay) = &config.relay {
        validate_relay_config(relay)?;
    }
    validate_mail_config(&config.mail)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address '{}' is not a socket address: {}",
            config.bind_address, e
        ))
    })?;

    for origin in &config.allowed_origins {
        if origin == "*" {
            continue;
        }
        validate_http_url("allowed_origins", origin)?;
    }

    Ok(())
}

/// Validates retailer configuration
fn validate_retailer_config(config: &RetailerConfig) -> Result<(), ConfigError> {
    validate_http_url("search_url", &config.search_url)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_seconds must be >= 1, got {}",
            config.timeout_seconds
        )));
    }

    Ok(())
}

/// Validates relay configuration
fn validate_relay_config(config: &RelayConfig) -> Result<(), ConfigError> {
    validate_http_url("relay endpoint", &config.endpoint)?;
    validate_secret_name("api_key_env", &config.api_key_env)
}

/// Validates mail configuration
fn validate_mail_config(config: &MailConfig) -> Result<(), ConfigError> {
    if config.smtp_host.trim().is_empty() {
        return Err(ConfigError::Validation(
            "smtp_host cannot be empty".to_string(),
        ));
    }

    if config.smtp_port == Some(0) {
        return Err(ConfigError::Validation(
            "smtp_port cannot be 0".to_string(),
        ));
    }

    validate_email(&config.recipient)?;
    validate_secret_name("user_env", &config.user_env)?;
    validate_secret_name("password_env", &config.password_env)?;

    Ok(())
}

/// Checks that a URL parses and uses an HTTP scheme
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

fn validate_secret_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "recipient cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
