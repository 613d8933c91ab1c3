//! Outbound side of the chat connection.

use async_trait::async_trait;
use xmpp_gateway::{GatewayClient, GatewayError};

/// Sends chat messages. Delivery is fire-and-forget from the bot's view:
/// callers log failures and move on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, to: &str, text: &str) -> Result<(), GatewayError>;
}

#[async_trait]
impl Transport for GatewayClient {
    async fn send(&self, to: &str, text: &str) -> Result<(), GatewayError> {
        GatewayClient::send(self, to, text).await
    }
}
