//! XMPP gateway HTTP client.

use crate::error::GatewayError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Client for the REST gateway that holds the bot's XMPP session.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    jid: String,
}

impl GatewayClient {
    /// Create a new gateway client for the bot account `jid`.
    pub fn new(base_url: impl Into<String>, jid: impl Into<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            jid: jid.into(),
        })
    }

    /// The bot's own JID.
    pub fn jid(&self) -> &str {
        &self.jid
    }

    /// Check if the gateway is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Receive pending message stanzas.
    #[instrument(skip(self))]
    pub async fn receive(&self) -> Result<Vec<Stanza>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/v1/receive/{}", self.base_url, encode(&self.jid)))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api(msg));
        }

        let stanzas: Vec<Stanza> = response.json().await?;
        debug!("Received {} stanzas", stanzas.len());
        Ok(stanzas)
    }

    /// Send a chat message to a recipient.
    #[instrument(skip(self, body))]
    pub async fn send(&self, to: &str, body: &str) -> Result<(), GatewayError> {
        let request = SendRequest {
            from: self.jid.clone(),
            to: to.to_string(),
            kind: "chat".into(),
            body: body.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/send", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(GatewayError::SendFailed(msg));
        }

        debug!("Sent message to {}", to);
        Ok(())
    }

    /// Reply to a message, addressed to the sender's full JID.
    pub async fn reply(&self, original: &ChatMessage, body: &str) -> Result<(), GatewayError> {
        self.send(&original.from, body).await
    }

    /// Broadcast an available presence with a status text.
    #[instrument(skip(self))]
    pub async fn set_status(&self, status: &str) -> Result<(), GatewayError> {
        let request = PresenceRequest {
            from: self.jid.clone(),
            show: "chat".into(),
            status: status.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/presence", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api(msg));
        }

        Ok(())
    }
}
