//! Shared state handed to every command.

use crate::remote::RemoteService;
use account_store::AccountStore;
use std::sync::Arc;

/// Everything a command needs besides its own arguments.
///
/// Built once at startup and shared by reference; commands never reach for
/// globals.
pub struct BotContext {
    pub store: AccountStore,
    pub remote: Arc<dyn RemoteService>,
    /// Display name of the notes service, used in replies.
    pub service_name: String,
    /// Reply text of the `about` command.
    pub about: String,
}

impl BotContext {
    pub fn new(
        store: AccountStore,
        remote: Arc<dyn RemoteService>,
        service_name: impl Into<String>,
        about: impl Into<String>,
    ) -> Self {
        Self {
            store,
            remote,
            service_name: service_name.into(),
            about: about.into(),
        }
    }
}
