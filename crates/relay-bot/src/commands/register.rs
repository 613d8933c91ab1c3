//! Register command - links a Jabber ID to a notes service account.

use crate::commands::{Command, CommandDescriptor, Failure, Invocation, Outcome, GENERIC_RETRY};
use crate::context::BotContext;
use account_store::{LinkedAccount, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct RegisterCommand {
    ctx: Arc<BotContext>,
    descriptor: CommandDescriptor,
}

impl RegisterCommand {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        let description = format!(
            "Registers a {} account with this jabber bot.",
            ctx.service_name
        );
        Self {
            ctx,
            descriptor: CommandDescriptor::new("register", description)
                .with_aliases(&["signup", "login", "logon"])
                .with_usage("USERNAME PASSWORD")
                .listed()
                .sensitive(),
        }
    }

    async fn run(&self, sender: &str, username: &str, password: &str) -> Result<Outcome, Failure> {
        if let Some(existing) = self.ctx.store.get(sender).await {
            return Err(Failure::AlreadyRegistered {
                username: existing.username,
            });
        }

        self.ctx.remote.authenticate(username, password).await?;

        let account = LinkedAccount::new(sender, username, password);
        match self.ctx.store.insert(account).await {
            Ok(()) => {}
            // Lost a race with another register from the same JID.
            Err(StoreError::AlreadyExists(_)) => {
                let username = self
                    .ctx
                    .store
                    .get(sender)
                    .await
                    .map(|existing| existing.username)
                    .unwrap_or_else(|| username.to_string());
                return Err(Failure::AlreadyRegistered { username });
            }
            Err(e) => return Err(e.into()),
        }

        info!("REGISTER: user {} ({}) created", username, sender);
        Ok(Outcome::Reply(format!(
            "Your Jabber account {} and your {} account {} are now registered at this Jabber bot.",
            sender, self.ctx.service_name, username
        )))
    }
}

#[async_trait]
impl Command for RegisterCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Outcome {
        match invocation.args {
            [username, password] => self.run(invocation.sender, username, password).await.into(),
            _ => Outcome::NeedsGuidance,
        }
    }

    fn failure_reply(&self, failure: &Failure, sender: &str) -> String {
        match failure {
            Failure::AuthenticationRequired => {
                "Username and password do not match. Please try again.".into()
            }
            Failure::AlreadyRegistered { username } => format!(
                "Your Jabber account {} is already registered with the {} account {}!",
                sender, self.ctx.service_name, username
            ),
            _ => GENERIC_RETRY.into(),
        }
    }
}
