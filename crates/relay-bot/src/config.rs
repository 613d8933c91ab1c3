//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// XMPP gateway configuration
    pub xmpp: XmppConfig,

    /// Notes service configuration
    pub service: ServiceConfig,

    /// Account store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XmppConfig {
    /// Gateway REST endpoint
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// The bot's own JID
    pub jid: String,

    /// Poll interval for messages
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Presence status announced at startup
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// API base URL
    #[serde(default = "default_service_url")]
    pub base_url: String,

    /// Application key sent with every request
    pub app_key: String,

    /// Display name used in replies
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding linked accounts
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Keep accounts in memory only
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Accept "<nickname>: <command>" as well
    #[serde(default)]
    pub nickname: Option<String>,

    /// Reply of the about command
    #[serde(default = "default_about")]
    pub about: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            in_memory: false,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            nickname: None,
            about: default_about(),
        }
    }
}

fn default_gateway_url() -> String {
    "http://xmpp-gateway:8080".into()
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(200)
}

fn default_status() -> String {
    "Send stuff! (or HELP for more information)".into()
}

fn default_service_url() -> String {
    "https://api.pownce.com/2.0".into()
}

fn default_service_name() -> String {
    "Pownce".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/accounts.json")
}

fn default_log_level() -> String {
    "info".into()
}

fn default_about() -> String {
    "I'm a jabber bot. Register with me and I'll post your notes for you.".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let source = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Keep app keys and JIDs as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        Self::from_config(source)
    }

    /// Deserialize an already-built `config::Config`.
    pub fn from_config(source: config::Config) -> Result<Self> {
        source
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
