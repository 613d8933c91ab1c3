//! Message command - posts a text note.

use crate::commands::{Command, CommandDescriptor, Failure, Invocation, Outcome, GENERIC_RETRY};
use crate::context::BotContext;
use crate::recipient::{self, Selector};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub struct MessageCommand {
    ctx: Arc<BotContext>,
    descriptor: CommandDescriptor,
}

impl MessageCommand {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            descriptor: CommandDescriptor::new(
                "message",
                "Posts a message. Optional: SEND_TO (@public, @all, @set_<NAME> or @<username>).",
            )
            .with_aliases(&["note", "msg"])
            .with_usage("[SEND_TO] NOTE")
            .listed(),
        }
    }

    async fn run(&self, sender: &str, args: &[String]) -> Result<Outcome, Failure> {
        let account = self.ctx.store.get(sender).await.ok_or(Failure::NotRegistered)?;

        let (selector, words) = recipient::split_selector(args);
        if words.is_empty() || selector == Some(Selector::Empty) {
            return Ok(Outcome::NeedsGuidance);
        }
        let body = words.join(" ");

        let session = self
            .ctx
            .remote
            .authenticate(&account.username, &account.password)
            .await?;
        let to = recipient::resolve(selector, session.as_ref()).await?;
        session.post_note(&to, &body).await?;

        info!("MESSAGE: {} wrote '{}'", account.username, body);
        Ok(Outcome::Posted("Your message has been posted.".into()))
    }
}

/// Replies shared by the commands that post to the notes service.
pub(crate) fn posting_failure_reply(service_name: &str, failure: &Failure) -> String {
    match failure {
        Failure::NotRegistered => format!("Please register your {} account first.", service_name),
        Failure::PrivacyViolation => "You are not allowed to do this.".into(),
        Failure::NotFound => {
            "The recipient could not be found or the note could not be handled. Try again.".into()
        }
        Failure::AuthenticationRequired => {
            "Username and password do not match (anymore). Please re-register with this bot."
                .into()
        }
        Failure::ServerError => format!("{} is having a nap. Try again later.", service_name),
        _ => GENERIC_RETRY.into(),
    }
}

#[async_trait]
impl Command for MessageCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Outcome {
        if invocation.args.is_empty() {
            return Outcome::NeedsGuidance;
        }
        self.run(invocation.sender, invocation.args).await.into()
    }

    fn failure_reply(&self, failure: &Failure, _sender: &str) -> String {
        posting_failure_reply(&self.ctx.service_name, failure)
    }
}
