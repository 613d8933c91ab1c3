//! Ping command.

use crate::commands::{Command, CommandDescriptor, Invocation, Outcome};
use async_trait::async_trait;

pub struct PingCommand {
    descriptor: CommandDescriptor,
}

impl PingCommand {
    pub fn new() -> Self {
        Self {
            descriptor: CommandDescriptor::new(
                "ping",
                "Sends an answer as fast as possible. a.k.a. ping.",
            ),
        }
    }
}

impl Default for PingCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for PingCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: &Invocation<'_>) -> Outcome {
        Outcome::Reply("pong".into())
    }
}
