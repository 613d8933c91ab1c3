//! About command - tells who runs the bot.

use crate::commands::{Command, CommandDescriptor, Invocation, Outcome};
use crate::context::BotContext;
use async_trait::async_trait;
use std::sync::Arc;

pub struct AboutCommand {
    ctx: Arc<BotContext>,
    descriptor: CommandDescriptor,
}

impl AboutCommand {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            descriptor: CommandDescriptor::new("about", "Sends an about message.")
                .with_aliases(&["author", "contact"])
                .listed(),
        }
    }
}

#[async_trait]
impl Command for AboutCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: &Invocation<'_>) -> Outcome {
        Outcome::Reply(self.ctx.about.clone())
    }
}
