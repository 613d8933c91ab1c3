//! Message receiver with polling.

use crate::client::GatewayClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Message receiver that polls the gateway for new stanzas.
pub struct MessageReceiver {
    client: GatewayClient,
    poll_interval: Duration,
}

impl MessageReceiver {
    /// Create a new message receiver.
    pub fn new(client: GatewayClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    /// Start receiving messages as an async stream, in arrival order.
    pub fn stream(self) -> impl Stream<Item = ChatMessage> {
        async_stream::stream! {
            loop {
                match self.client.receive().await {
                    Ok(stanzas) => {
                        for stanza in stanzas {
                            if let Some(msg) = ChatMessage::from_stanza(&stanza) {
                                debug!("Received message from {} ({} bytes)",
                                    msg.sender,
                                    msg.body.as_deref().map(str::len).unwrap_or(0)
                                );
                                yield msg;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        // Back off on error
                        sleep(Duration::from_secs(5)).await;
                        continue;
                    }
                }

                sleep(self.poll_interval).await;
            }
        }
    }
}
