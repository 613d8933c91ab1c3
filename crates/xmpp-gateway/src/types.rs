//! Gateway API types.

use crate::jid::bare_jid;
use serde::{Deserialize, Serialize};

/// A message stanza as delivered by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct Stanza {
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    /// Absent for receipts, chat states and other payloads without text.
    #[serde(default)]
    pub body: Option<String>,
}

/// Outgoing message request.
#[derive(Debug, Clone, Serialize)]
pub struct SendRequest {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub body: String,
}

/// Presence broadcast request.
#[derive(Debug, Clone, Serialize)]
pub struct PresenceRequest {
    pub from: String,
    pub show: String,
    pub status: String,
}

/// Parsed message for bot processing.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Full address of the sender, resource included.
    pub from: String,
    /// Bare address of the sender.
    pub sender: String,
    /// Message text, if the stanza carried any.
    pub body: Option<String>,
    /// Stanza id.
    pub id: Option<String>,
}

impl ChatMessage {
    /// Extract a chat message from a stanza.
    ///
    /// Only `chat` and `normal` messages are addressed to the bot; error,
    /// groupchat and headline stanzas are dropped.
    pub fn from_stanza(stanza: &Stanza) -> Option<Self> {
        match stanza.kind.as_deref() {
            None | Some("chat") | Some("normal") => {}
            Some(_) => return None,
        }

        Some(Self {
            from: stanza.from.clone(),
            sender: bare_jid(&stanza.from),
            body: stanza.body.clone(),
            id: stanza.id.clone(),
        })
    }

    /// Build a message directly (used by tests and local tooling).
    pub fn new(from: impl Into<String>, body: impl Into<String>) -> Self {
        let from = from.into();
        Self {
            sender: bare_jid(&from),
            from,
            body: Some(body.into()),
            id: None,
        }
    }

    /// The non-empty text of the message, if any.
    pub fn text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
