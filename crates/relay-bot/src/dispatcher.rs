//! Turns inbound chat messages into command runs and replies.

use crate::commands::{Command, Invocation, Outcome};
use crate::registry::CommandRegistry;
use crate::transport::Transport;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};
use xmpp_gateway::ChatMessage;

/// A message sent out of band, after the synchronous reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Full address of the recipient.
    pub to: String,
    pub text: String,
}

/// A command keyword and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased keyword, trailing `:` removed.
    pub keyword: String,
    pub args: Vec<String>,
}

/// Split message text into keyword and arguments.
///
/// With a nickname configured, a leading `nick:` (or `nick,`) is skipped.
/// Returns `None` when nothing is left.
pub fn parse(text: &str, nickname: Option<&str>) -> Option<ParsedCommand> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();

    if let (Some(nick), Some(first)) = (nickname, tokens.first()) {
        let addressed = first.trim_end_matches([':', ',']);
        if addressed.len() < first.len() && addressed.eq_ignore_ascii_case(nick) {
            tokens.remove(0);
        }
    }

    let (first, rest) = tokens.split_first()?;
    let keyword = first.trim_end_matches(':').to_lowercase();
    if keyword.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        keyword,
        args: rest.iter().map(|s| s.to_string()).collect(),
    })
}

/// Routes messages to commands.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    notifier: UnboundedSender<Notification>,
    nickname: Option<String>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, notifier: UnboundedSender<Notification>) -> Self {
        Self {
            registry,
            notifier,
            nickname: None,
        }
    }

    /// Also accept `<nickname>: <command>`.
    pub fn with_nickname(mut self, nickname: Option<String>) -> Self {
        self.nickname = nickname.filter(|nick| !nick.trim().is_empty());
        self
    }

    /// Run the command in a message and return the synchronous reply, if any.
    ///
    /// Messages without text (receipts, chat states) are ignored.
    pub async fn handle(&self, message: &ChatMessage) -> Option<String> {
        let text = message.text()?;
        let ParsedCommand { keyword, mut args } = parse(text, self.nickname.as_deref())?;

        // Two-word keywords ("ni hao").
        let (command, keyword) = match args.first() {
            Some(next) => {
                let joined = format!("{} {}", keyword, next.to_lowercase());
                match self.registry.lookup(&joined) {
                    Some(command) => {
                        args.remove(0);
                        (command, joined)
                    }
                    None => (self.registry.resolve(&keyword), keyword),
                }
            }
            None => (self.registry.resolve(&keyword), keyword),
        };

        let descriptor = command.descriptor();
        debug!(
            "Dispatching '{}' ({}) from {}",
            keyword, descriptor.name, message.sender
        );

        let invocation = Invocation {
            sender: &message.sender,
            args: &args,
            registry: &self.registry,
        };

        let reply = match command.execute(&invocation).await {
            Outcome::Reply(text) => text,
            Outcome::Posted(text) => {
                self.notify(&message.from, text);
                return None;
            }
            Outcome::NeedsGuidance => command.guidance(),
            Outcome::Failed(failure) => {
                if let crate::commands::Failure::Unexpected(cause) = &failure {
                    error!(
                        "Command '{}' from {} failed with args [{}]: {}",
                        descriptor.name,
                        message.sender,
                        loggable_args(command.as_ref(), &args),
                        cause
                    );
                }
                command.failure_reply(&failure, &message.sender)
            }
        };

        Some(reply).filter(|text| !text.is_empty())
    }

    /// Handle a message and send the reply back to where it came from.
    pub async fn deliver(&self, message: &ChatMessage, transport: &dyn Transport) {
        let Some(reply) = self.handle(message).await else {
            return;
        };

        if let Err(e) = transport.send(&message.from, &reply).await {
            error!("Failed to send reply to {}: {}", message.from, e);
        }
    }

    fn notify(&self, to: &str, text: String) {
        let notification = Notification {
            to: to.to_string(),
            text,
        };
        if self.notifier.send(notification).is_err() {
            info!("Notification channel closed, dropping confirmation for {}", to);
        }
    }
}

fn loggable_args(command: &dyn Command, args: &[String]) -> String {
    if command.descriptor().sensitive_args {
        format!("<{} redacted>", args.len())
    } else {
        args.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_context, RemoteCall};
    use crate::transport::MockTransport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    const ALICE: &str = "alice@example.org/laptop";

    fn dispatcher() -> (
        Dispatcher,
        UnboundedReceiver<Notification>,
        Arc<crate::testing::FakeRemote>,
    ) {
        let (ctx, remote) = test_context();
        let registry = CommandRegistry::build(ctx, StdRng::seed_from_u64(3)).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher::new(Arc::new(registry), tx), rx, remote)
    }

    async fn say(dispatcher: &Dispatcher, text: &str) -> Option<String> {
        dispatcher.handle(&ChatMessage::new(ALICE, text)).await
    }

    #[test]
    fn test_parse() {
        let parsed = parse("  Register  alice   secret1 ", None).unwrap();
        assert_eq!(parsed.keyword, "register");
        assert_eq!(parsed.args, vec!["alice", "secret1"]);

        assert_eq!(parse("help:", None).unwrap().keyword, "help");
        assert!(parse("   ", None).is_none());
        assert!(parse(":", None).is_none());
    }

    #[test]
    fn test_parse_nickname_addressing() {
        let parsed = parse("Relay: ping now", Some("relay")).unwrap();
        assert_eq!(parsed.keyword, "ping");
        assert_eq!(parsed.args, vec!["now"]);

        // Without the separator the nickname is the keyword.
        assert_eq!(parse("relay ping", Some("relay")).unwrap().keyword, "relay");
        assert!(parse("relay:", Some("relay")).is_none());
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let (dispatcher, _rx, _remote) = dispatcher();
        assert_eq!(
            say(&dispatcher, "frobnicate now").await.as_deref(),
            Some("Unknown command. Type \"help\" for available commands.")
        );
    }

    #[tokio::test]
    async fn test_ping_and_bodiless_message() {
        let (dispatcher, _rx, _remote) = dispatcher();
        assert_eq!(say(&dispatcher, "PING").await.as_deref(), Some("pong"));
        assert_eq!(say(&dispatcher, "   ").await, None);

        let receipt = ChatMessage::from_stanza(&xmpp_gateway::Stanza {
            from: ALICE.into(),
            to: None,
            kind: Some("chat".into()),
            id: None,
            body: None,
        })
        .unwrap();
        assert_eq!(dispatcher.handle(&receipt).await, None);
    }

    #[tokio::test]
    async fn test_two_word_greeting() {
        let (dispatcher, _rx, _remote) = dispatcher();
        let reply = say(&dispatcher, "ni hao").await.unwrap();
        assert!(reply.ends_with('!'));
    }

    #[tokio::test]
    async fn test_guidance_for_missing_args() {
        let (dispatcher, _rx, remote) = dispatcher();
        assert_eq!(
            say(&dispatcher, "register alice").await.as_deref(),
            Some("Usage: register USERNAME PASSWORD")
        );
        assert_eq!(
            say(&dispatcher, "unregister").await.as_deref(),
            Some("Usage: unregister PASSWORD")
        );
        assert!(remote.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_then_double_register() {
        let (dispatcher, _rx, _remote) = dispatcher();

        assert_eq!(
            say(&dispatcher, "register alice secret1").await.as_deref(),
            Some(
                "Your Jabber account alice@example.org and your Pownce account alice \
                 are now registered at this Jabber bot."
            )
        );
        assert_eq!(
            say(&dispatcher, "signup alice secret1").await.as_deref(),
            Some(
                "Your Jabber account alice@example.org is already registered with the \
                 Pownce account alice!"
            )
        );
    }

    #[tokio::test]
    async fn test_register_rejected_credentials() {
        let (dispatcher, _rx, _remote) = dispatcher();
        assert_eq!(
            say(&dispatcher, "register alice wrong").await.as_deref(),
            Some("Username and password do not match. Please try again.")
        );
    }

    #[tokio::test]
    async fn test_posted_message_goes_to_notification_channel() {
        let (dispatcher, mut rx, remote) = dispatcher();
        say(&dispatcher, "register alice secret1").await;

        let reply = say(&dispatcher, "message @public hello world").await;
        assert_eq!(reply, None);

        let notification = rx.try_recv().unwrap();
        assert_eq!(notification.to, ALICE);
        assert_eq!(notification.text, "Your message has been posted.");
        assert!(remote.calls().contains(&RemoteCall::PostNote {
            to: "public".into(),
            body: "hello world".into()
        }));
    }

    #[tokio::test]
    async fn test_unexpected_failure_gets_generic_reply() {
        let (dispatcher, _rx, remote) = dispatcher();
        say(&dispatcher, "register alice secret1").await;
        remote.fail_posts_with(418);

        assert_eq!(
            say(&dispatcher, "message hello").await.as_deref(),
            Some("Something went wrong. Try again.")
        );
    }

    #[tokio::test]
    async fn test_deliver_sends_reply_to_full_address() {
        let (dispatcher, _rx, _remote) = dispatcher();

        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|to, text| to == ALICE && text == "pong")
            .times(1)
            .returning(|_, _| Ok(()));

        dispatcher
            .deliver(&ChatMessage::new(ALICE, "ping"), &transport)
            .await;
    }

    #[tokio::test]
    async fn test_deliver_swallows_send_failure() {
        let (dispatcher, _rx, _remote) = dispatcher();

        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_, _| Err(xmpp_gateway::GatewayError::SendFailed("offline".into())));

        dispatcher
            .deliver(&ChatMessage::new(ALICE, "ping"), &transport)
            .await;
    }

    #[tokio::test]
    async fn test_deliver_sends_nothing_for_posted() {
        let (dispatcher, mut rx, _remote) = dispatcher();
        say(&dispatcher, "register alice secret1").await;

        let mut transport = MockTransport::new();
        transport.expect_send().times(0);

        dispatcher
            .deliver(&ChatMessage::new(ALICE, "link https://example.org"), &transport)
            .await;
        assert_eq!(rx.try_recv().unwrap().text, "Your link has been posted.");
    }
}
