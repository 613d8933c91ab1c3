//! XMPP bot that relays chat commands to a notes service.
//!
//! Users link their Jabber ID to a notes service account with `register`,
//! then post text notes and links by chatting with the bot.

pub mod commands;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod recipient;
pub mod registry;
pub mod remote;
pub mod transport;

pub use context::BotContext;
pub use dispatcher::{Dispatcher, Notification};
pub use error::{AppError, AppResult};
pub use registry::{CommandRegistry, RegistryError};
pub use remote::{RemoteService, RemoteSession};
pub use transport::Transport;
