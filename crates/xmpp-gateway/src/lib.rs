//! Client for a REST gateway that owns the bot's XMPP session.
//!
//! Connecting, authenticating, presence subscription handling and stream
//! reconnection all happen inside the gateway. The bot only polls for
//! message stanzas and posts replies.

mod client;
mod error;
mod jid;
mod receiver;
mod types;

pub use client::GatewayClient;
pub use error::GatewayError;
pub use jid::bare_jid;
pub use receiver::MessageReceiver;
pub use types::*;
