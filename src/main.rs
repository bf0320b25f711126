//! PC-Quote main entry point
//!
//! This is the command-line interface that starts the parts search and quote
//! email HTTP service.

use clap::Parser;
use pc_quote::config::{load_config_with_hash, Config};
use pc_quote::secrets::{mail_credentials, relay_api_key, EnvSecrets};
use pc_quote::server::{build_router, serve, AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// PC-Quote: parts search and quote mailing backend
///
/// Serves component searches against a retailer listing page and emails
/// build quotes to the shop inbox. Credentials are read from the environment
/// (or a `.env` file) under the names given in the config.
#[derive(Parser, Debug)]
#[command(name = "pc-quote")]
#[command(version = "1.0.0")]
#[command(about = "Parts search and quote mailing backend", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the resolved setup without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let secrets = EnvSecrets::load();

    if cli.check {
        handle_check(&config, &secrets);
        return Ok(());
    }

    let state = AppState::from_config(&config, &secrets)?;
    let router = build_router(state, &config.server)?;

    match serve(router, &config.server).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Server failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pc_quote=info,tower_http=info,warn"),
            1 => EnvFilter::new("pc_quote=debug,tower_http=debug,info"),
            2 => EnvFilter::new("pc_quote=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --check: prints what the service would run with
fn handle_check(config: &Config, secrets: &EnvSecrets) {
    println!("=== PC-Quote Configuration Check ===\n");

    println!("Server:");
    println!("  Bind address: {}", config.server.bind_address);
    if config.server.allowed_origins.is_empty() {
        println!("  Allowed origins: any");
    } else {
        println!("  Allowed origins: {}", config.server.allowed_origins.join(", "));
    }

    println!("\nRetailer:");
    println!("  Search URL: {}", config.retailer.search_url);
    println!("  Timeout: {}s", config.retailer.timeout_seconds);

    match &config.relay {
        Some(relay) => {
            let key = if relay_api_key(config, secrets).is_some() {
                "set"
            } else {
                "MISSING"
            };
            println!(
                "  Fetch mode: relay via {} ({}: {})",
                relay.endpoint, relay.api_key_env, key
            );
        }
        None => println!("  Fetch mode: direct"),
    }

    println!("\nMail:");
    println!("  SMTP host: {}", config.mail.smtp_host);
    println!("  Recipient: {}", config.mail.recipient);
    let credentials = if mail_credentials(config, secrets).is_some() {
        "set"
    } else {
        "MISSING"
    };
    println!(
        "  Credentials ({} / {}): {}",
        config.mail.user_env, config.mail.password_env, credentials
    );

    println!("\n✓ Configuration is valid");
}
