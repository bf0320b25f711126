use serde::Deserialize;

/// Main configuration structure for PC-Quote
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub retailer: RetailerConfig,
    /// When present, listing pages are fetched through the relay service
    #[serde(default)]
    pub relay: Option<RelayConfig>,
    pub mail: MailConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    /// Origins allowed by CORS; empty or `"*"` allows any origin
    #[serde(rename = "allowed-origins", default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Retailer search page configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RetailerConfig {
    /// Search page prefix; the encoded query is appended verbatim
    #[serde(rename = "search-url", default = "default_search_url")]
    pub search_url: String,

    /// User agent sent on direct fetches
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RetailerConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Scraping relay configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Relay endpoint that accepts `api_key` and `url` query parameters
    pub endpoint: String,

    /// Name of the secret holding the relay API key
    #[serde(rename = "api-key-env", default = "default_relay_key_env")]
    pub api_key_env: String,
}

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// SMTP relay host
    #[serde(rename = "smtp-host", default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP port; the transport default is used when unset
    #[serde(rename = "smtp-port", default)]
    pub smtp_port: Option<u16>,

    /// Display name used in the From header
    #[serde(rename = "sender-name", default = "default_sender_name")]
    pub sender_name: String,

    /// Fixed address every quote is sent to
    pub recipient: String,

    /// Name of the secret holding the SMTP username
    #[serde(rename = "user-env", default = "default_mail_user_env")]
    pub user_env: String,

    /// Name of the secret holding the SMTP password
    #[serde(rename = "password-env", default = "default_mail_password_env")]
    pub password_env: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_search_url() -> String {
    "https://www.newegg.com/p/pl?d=".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_relay_key_env() -> String {
    "SCRAPER_API_KEY".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_sender_name() -> String {
    "RB Builds".to_string()
}

fn default_mail_user_env() -> String {
    "EMAIL_USER".to_string()
}

fn default_mail_password_env() -> String {
    "EMAIL_PASS".to_string()
}
