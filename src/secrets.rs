//! Secret lookup
//!
//! Credentials never live in the config file. The config names the secrets,
//! and a [`SecretSource`] resolves them once at startup.

use crate::config::Config;
use std::collections::HashMap;

/// A read-only store of named secrets
pub trait SecretSource: Send + Sync {
    /// Returns the secret value, or `None` if it is unset or blank
    fn get(&self, name: &str) -> Option<String>;
}

/// Secrets read from the process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecrets;

impl EnvSecrets {
    /// Loads a `.env` file into the environment if one exists
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Failed to load .env file: {}", e),
        }
        Self
    }
}

impl SecretSource for EnvSecrets {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Fixed in-memory secrets
#[derive(Debug, Default, Clone)]
pub struct StaticSecrets {
    values: HashMap<String, String>,
}

impl StaticSecrets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }
}

impl SecretSource for StaticSecrets {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).filter(|v| !v.trim().is_empty()).cloned()
    }
}

/// SMTP login
#[derive(Clone, PartialEq, Eq)]
pub struct MailCredentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Resolves the SMTP login named by the mail config
///
/// Returns `None` unless both the user and the password are set.
pub fn mail_credentials(config: &Config, secrets: &dyn SecretSource) -> Option<MailCredentials> {
    let user = secrets.get(&config.mail.user_env);
    let password = secrets.get(&config.mail.password_env);

    match (user, password) {
        (Some(user), Some(password)) => Some(MailCredentials { user, password }),
        _ => {
            tracing::warn!(
                "Mail credentials {} / {} are not set; quote emails will fail",
                config.mail.user_env,
                config.mail.password_env
            );
            None
        }
    }
}

/// Resolves the relay API key, if a relay is configured
pub fn relay_api_key(config: &Config, secrets: &dyn SecretSource) -> Option<String> {
    let relay = config.relay.as_ref()?;
    let key = secrets.get(&relay.api_key_env);
    if key.is_none() {
        tracing::warn!(
            "Relay API key {} is not set; parts searches will fail",
            relay.api_key_env
        );
    }
    key
}
