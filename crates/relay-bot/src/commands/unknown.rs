//! Fallback for keywords no command claims.

use crate::commands::{Command, CommandDescriptor, Invocation, Outcome};
use async_trait::async_trait;

pub const UNKNOWN_REPLY: &str = "Unknown command. Type \"help\" for available commands.";

pub struct UnknownCommand {
    descriptor: CommandDescriptor,
}

impl UnknownCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new("unknown", "Answers unrecognized commands."),
        }
    }
}

impl Default for UnknownCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for UnknownCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: &Invocation<'_>) -> Outcome {
        Outcome::Reply(UNKNOWN_REPLY.into())
    }
}
