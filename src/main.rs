//! Exchange client - Main executable
//!
//! Signs in to the exchange backend when needed and watches the transactions
//! waiting for the user's multi-signature approval, printing a summary every
//! time the list changes.
use anyhow::Context;
use chrono::Utc;
use dotenv::dotenv;
use exchange_client::{format_pending_list, ClientConfig, ServiceContainer};
use log::{info, warn};
use std::env;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting exchange client v{}", exchange_client::VERSION);

    let config = ClientConfig::from_env().context("Failed to load EXCHANGE_* configuration")?;
    info!("Using API at {}", config.api_base_url);

    let services = ServiceContainer::new(config).context("Failed to create API client")?;

    // Sign in only when no token is stored yet
    let auth = services.auth_interactor();
    if !auth.is_authenticated() {
        let email = env::var("EXCHANGE_EMAIL")
            .context("No stored session; EXCHANGE_EMAIL must be set to sign in")?;
        let password = env::var("EXCHANGE_PASSWORD")
            .context("No stored session; EXCHANGE_PASSWORD must be set to sign in")?;

        auth.login(&email, &password)
            .await
            .context("Failed to sign in")?;
    }

    match auth.profile().await {
        Ok(user) => info!("Signed in as {}", user.display_name()),
        Err(e) if e.is_unauthorized() => {
            auth.logout()?;
            anyhow::bail!("Stored session has expired, sign in again");
        }
        Err(e) => warn!("Failed to load profile: {}", e),
    }

    let mut watcher = services.multisig_watcher();
    let mut updates = watcher.subscribe();
    watcher.start();

    info!("Watching pending approvals. Press Ctrl+C to stop.");
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", format_pending_list(&snapshot, Utc::now()));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
        }
    }

    watcher.stop().await;

    Ok(())
}
