//! Notes relay bot - Main entry point.

use account_store::AccountStore;
use anyhow::Context;
use notes_client::NotesClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use relay_bot::config::Config;
use relay_bot::{AppResult, BotContext, CommandRegistry, Dispatcher};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xmpp_gateway::{GatewayClient, MessageReceiver};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting notes relay bot...");

    // Initialize clients
    let notes = NotesClient::new(
        &config.service.base_url,
        &config.service.app_key,
        config.service.timeout,
    )?;

    let store = if config.store.in_memory {
        warn!("Account store is in-memory only - links are lost on restart");
        AccountStore::in_memory()
    } else {
        AccountStore::open(&config.store.path).await?
    };
    info!("Account store ready ({} linked accounts)", store.count().await);

    let gateway = GatewayClient::new(&config.xmpp.gateway_url, &config.xmpp.jid)?;

    // Health checks
    if notes.health_check().await {
        info!("{} API reachable at {}", config.service.name, notes.base_url());
    } else {
        warn!("{} API health check failed - will retry on requests", config.service.name);
    }

    if !gateway.health_check().await {
        error!("XMPP gateway not reachable at {}", config.xmpp.gateway_url);
        return Err(anyhow::anyhow!("XMPP gateway not reachable").into());
    }
    info!("XMPP gateway healthy");

    if let Err(e) = gateway.set_status(&config.xmpp.status).await {
        warn!("Failed to set presence status: {}", e);
    }

    // Create command table
    let ctx = Arc::new(BotContext::new(
        store,
        Arc::new(notes),
        config.service.name.clone(),
        config.bot.about.clone(),
    ));
    let registry = Arc::new(CommandRegistry::build(ctx, StdRng::from_entropy())?);
    info!("Registered {} commands", registry.commands().len());

    let (notify_tx, mut notify_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(registry, notify_tx).with_nickname(config.bot.nickname.clone());

    info!("Listening for messages as {}...", gateway.jid());

    // Start message receiver
    let receiver = MessageReceiver::new(gateway.clone(), config.xmpp.poll_interval);
    let mut stream = Box::pin(receiver.stream());

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                dispatcher.deliver(&message, &gateway).await;
            }
            Some(notification) = notify_rx.recv() => {
                if let Err(e) = gateway.send(&notification.to, &notification.text).await {
                    error!("Failed to send notification to {}: {}", notification.to, e);
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
