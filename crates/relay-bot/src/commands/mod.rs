//! Bot command handlers.

mod about;
mod greeting;
mod help;
mod link;
mod message;
mod ping;
mod register;
mod unknown;
mod unregister;

pub use about::AboutCommand;
pub use greeting::{GreetingCommand, GREETINGS};
pub use help::HelpCommand;
pub use link::LinkCommand;
pub use message::MessageCommand;
pub use ping::PingCommand;
pub use register::RegisterCommand;
pub use unknown::{UnknownCommand, UNKNOWN_REPLY};
pub use unregister::UnregisterCommand;

use crate::registry::CommandRegistry;
use account_store::StoreError;
use async_trait::async_trait;
use notes_client::NotesError;

/// Reply for failures a command has no specific text for.
pub const GENERIC_RETRY: &str = "Something went wrong. Try again.";

/// Static description of a command, as shown by `help`.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    /// Primary keyword.
    pub name: &'static str,
    /// Alternate keywords.
    pub aliases: &'static [&'static str],
    /// Argument synopsis.
    pub usage: Option<&'static str>,
    /// One-line description.
    pub description: String,
    /// Listed in the `help` overview.
    pub help_visible: bool,
    /// Arguments are credentials and must not be logged.
    pub sensitive_args: bool,
}

impl CommandDescriptor {
    pub fn new(name: &'static str, description: impl Into<String>) -> Self {
        Self {
            name,
            aliases: &[],
            usage: None,
            description: description.into(),
            help_visible: false,
            sensitive_args: false,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: &'static str) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn listed(mut self) -> Self {
        self.help_visible = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive_args = true;
        self
    }

    /// `name usage`, or just the name for commands without arguments.
    pub fn synopsis(&self) -> String {
        match self.usage {
            Some(usage) => format!("{} {}", self.name, usage),
            None => self.name.to_string(),
        }
    }
}

/// One command invocation.
pub struct Invocation<'a> {
    /// Bare JID of the sender.
    pub sender: &'a str,
    /// Whitespace-separated arguments after the command keyword.
    pub args: &'a [String],
    /// Registry the command was resolved from.
    pub registry: &'a CommandRegistry,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to send straight back to the sender.
    Reply(String),
    /// The remote post went through; the confirmation travels on the
    /// notification channel instead of the synchronous reply.
    Posted(String),
    /// Arguments were missing or malformed; answer with usage text.
    NeedsGuidance,
    /// The command failed; the command turns this into its own wording.
    Failed(Failure),
}

impl From<Result<Outcome, Failure>> for Outcome {
    fn from(result: Result<Outcome, Failure>) -> Self {
        result.unwrap_or_else(Outcome::Failed)
    }
}

/// Failure kinds a command can end with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Stored or supplied credentials were rejected.
    AuthenticationRequired,
    /// The recipient is not allowed.
    PrivacyViolation,
    /// Recipient or note missing or invalid.
    NotFound,
    /// The notes service is unavailable.
    ServerError,
    /// The sender already has a linked account.
    AlreadyRegistered { username: String },
    /// The sender has no linked account.
    NotRegistered,
    /// Anything else; logged with full context.
    Unexpected(String),
}

impl From<NotesError> for Failure {
    fn from(err: NotesError) -> Self {
        match err {
            NotesError::AuthenticationRequired => Failure::AuthenticationRequired,
            NotesError::PrivacyViolation => Failure::PrivacyViolation,
            NotesError::NotFound => Failure::NotFound,
            NotesError::ServerError => Failure::ServerError,
            other => Failure::Unexpected(other.to_string()),
        }
    }
}

impl From<StoreError> for Failure {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Failure::NotRegistered,
            other => Failure::Unexpected(other.to_string()),
        }
    }
}

/// Command handler trait.
#[async_trait]
pub trait Command: Send + Sync {
    /// Name, aliases and help text.
    fn descriptor(&self) -> &CommandDescriptor;

    /// Run the command.
    async fn execute(&self, invocation: &Invocation<'_>) -> Outcome;

    /// Reply for a failed run.
    fn failure_reply(&self, _failure: &Failure, _sender: &str) -> String {
        GENERIC_RETRY.into()
    }

    /// Reply for a run with missing or malformed arguments.
    fn guidance(&self) -> String {
        format!("Usage: {}", self.descriptor().synopsis())
    }
}
