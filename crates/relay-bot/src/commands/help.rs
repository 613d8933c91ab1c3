//! Help command - lists commands or explains specific ones.

use crate::commands::{Command, CommandDescriptor, Invocation, Outcome, UNKNOWN_REPLY};
use crate::context::BotContext;
use async_trait::async_trait;
use std::sync::Arc;

pub struct HelpCommand {
    ctx: Arc<BotContext>,
    descriptor: CommandDescriptor,
}

impl HelpCommand {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            descriptor: CommandDescriptor::new(
                "help",
                "Sends back help about the given command(s).",
            )
            .with_aliases(&["wtf", "howto"])
            .with_usage("COMMAND [...]")
            .listed(),
        }
    }
}

#[async_trait]
impl Command for HelpCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Outcome {
        if invocation.args.is_empty() {
            return Outcome::Reply(format!(
                "This is a {} jabber bot. Available commands:\n\n{}",
                self.ctx.service_name,
                invocation.registry.help_listing()
            ));
        }

        let mut entries = Vec::with_capacity(invocation.args.len() * 2);
        for name in invocation.args {
            let Some(command) = invocation.registry.lookup(name) else {
                return Outcome::Reply(UNKNOWN_REPLY.into());
            };

            let descriptor = command.descriptor();
            if let Some(usage) = descriptor.usage {
                entries.push(format!("Usage: {} {}\n", name.to_lowercase(), usage));
            }
            entries.push(descriptor.description.clone());
        }

        // The whole entry list is reversed, so a description precedes its usage line.
        entries.reverse();
        Outcome::Reply(entries.join("\n"))
    }
}
