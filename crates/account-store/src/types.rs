//! Linked account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Current on-disk schema version.
pub const DATA_VERSION: u32 = 1;

/// Association between a bare chat address and remote-service credentials.
///
/// The password is kept in clear: the notes API only accepts username and
/// password, so every post has to authenticate with it again.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkedAccount {
    /// Bare JID (no resource).
    pub jid: String,
    /// Username on the notes service.
    pub username: String,
    /// Password on the notes service.
    pub password: String,
    /// When the link was created.
    pub linked_at: DateTime<Utc>,
}

impl LinkedAccount {
    pub fn new(
        jid: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            jid: jid.into(),
            username: username.into(),
            password: password.into(),
            linked_at: Utc::now(),
        }
    }

    /// Compare a supplied password against the stored one.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

impl fmt::Debug for LinkedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedAccount")
            .field("jid", &self.jid)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("linked_at", &self.linked_at)
            .finish()
    }
}

/// Persistent layout of the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreData {
    pub version: u32,
    pub accounts: HashMap<String, LinkedAccount>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: DATA_VERSION,
            accounts: HashMap::new(),
        }
    }
}
