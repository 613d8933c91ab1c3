//! Unregister command - removes the sender's linked account.

use crate::commands::{Command, CommandDescriptor, Failure, Invocation, Outcome};
use crate::context::BotContext;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

pub struct UnregisterCommand {
    ctx: Arc<BotContext>,
    descriptor: CommandDescriptor,
}

impl UnregisterCommand {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        let description = format!(
            "Unregisters a {} account with this jabber bot.",
            ctx.service_name
        );
        Self {
            ctx,
            descriptor: CommandDescriptor::new("unregister", description)
                .with_aliases(&["logoff", "signoff"])
                .with_usage("PASSWORD")
                .listed()
                .sensitive(),
        }
    }

    async fn run(&self, sender: &str, password: &str) -> Result<Outcome, Failure> {
        let account = self.ctx.store.get(sender).await.ok_or(Failure::NotRegistered)?;

        if !account.password_matches(password) {
            return Err(Failure::AuthenticationRequired);
        }

        // The user is told it worked either way; a failed delete only shows up in the log.
        if let Err(e) = self.ctx.store.remove(sender).await {
            warn!("UNREGISTER: removing {} failed: {}", sender, e);
        }

        info!("UNREGISTER: user {} ({}) removed", account.username, sender);
        Ok(Outcome::Reply(format!(
            "Your Jabber account {} is now unregistered!",
            sender
        )))
    }
}

#[async_trait]
impl Command for UnregisterCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Outcome {
        match invocation.args {
            [password] => self.run(invocation.sender, password).await.into(),
            _ => Outcome::NeedsGuidance,
        }
    }

    fn failure_reply(&self, failure: &Failure, sender: &str) -> String {
        match failure {
            Failure::AuthenticationRequired => "Supplied password is wrong.".into(),
            Failure::NotRegistered => format!(
                "You have no {} account registered under the Jabber ID {}",
                self.ctx.service_name, sender
            ),
            _ => "Unregistering was not successful. Try again.".into(),
        }
    }
}
