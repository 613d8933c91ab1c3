//! Link command - posts a URL with an optional note.

use crate::commands::message::posting_failure_reply;
use crate::commands::{Command, CommandDescriptor, Failure, Invocation, Outcome};
use crate::context::BotContext;
use crate::recipient::{self, Selector};
use async_trait::async_trait;
use regex_lite::Regex;
use std::sync::{Arc, LazyLock};
use tracing::info;

static URL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").ok());

pub struct LinkCommand {
    ctx: Arc<BotContext>,
    descriptor: CommandDescriptor,
}

impl LinkCommand {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self {
            ctx,
            descriptor: CommandDescriptor::new(
                "link",
                "Posts a link. Optional: NOTE, SEND_TO (@public, @all, @set_<NAME> or @<username>).",
            )
            .with_aliases(&["url"])
            .with_usage("[SEND_TO] URL [NOTE]")
            .listed(),
        }
    }

    async fn run(&self, sender: &str, args: &[String]) -> Result<Outcome, Failure> {
        let account = self.ctx.store.get(sender).await.ok_or(Failure::NotRegistered)?;
        if args.is_empty() {
            return Ok(Outcome::NeedsGuidance);
        }

        let (selector, rest) = recipient::split_selector(args);
        if selector == Some(Selector::Empty) {
            return Ok(Outcome::NeedsGuidance);
        }
        let Some((url, note_words)) = rest.split_first() else {
            return Ok(Outcome::NeedsGuidance);
        };

        if !is_valid_url(url) {
            return Ok(Outcome::Reply("A valid URL is required.".into()));
        }
        let note = link_note(url, note_words);

        let session = self
            .ctx
            .remote
            .authenticate(&account.username, &account.password)
            .await?;
        let to = recipient::resolve(selector, session.as_ref()).await?;
        session.post_link(&to, url, &note).await?;

        info!("LINK: {} posted '{}'", account.username, url);
        Ok(Outcome::Posted("Your link has been posted.".into()))
    }
}

fn is_valid_url(candidate: &str) -> bool {
    URL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(candidate))
}

/// Note text after the URL. Some chat clients repeat a pasted link as
/// `[<url>]`; that copy is dropped.
fn link_note(url: &str, words: &[String]) -> String {
    let words = match words.split_first() {
        Some((first, rest)) if *first == format!("[{}]", url) => rest,
        _ => words,
    };
    words.join(" ")
}

#[async_trait]
impl Command for LinkCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, invocation: &Invocation<'_>) -> Outcome {
        self.run(invocation.sender, invocation.args).await.into()
    }

    fn failure_reply(&self, failure: &Failure, _sender: &str) -> String {
        match failure {
            Failure::NotFound => "The user or note could not be handled.".into(),
            Failure::Unexpected(_) => {
                "Something went wrong. Check if the URL is valid and then try again.".into()
            }
            other => posting_failure_reply(&self.ctx.service_name, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_url_validation() {
        assert!(is_valid_url("http://example.org"));
        assert!(is_valid_url("https://example.org/a?b=c#d"));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("ftp://example.org"));
        assert!(!is_valid_url("https://"));
        assert!(!is_valid_url("example.org/https://x"));
    }

    #[test]
    fn test_link_note() {
        let url = "https://example.org";
        assert_eq!(link_note(url, &[]), "");
        assert_eq!(link_note(url, &words(&["nice", "read"])), "nice read");
        assert_eq!(
            link_note(url, &words(&["[https://example.org]", "nice", "read"])),
            "nice read"
        );
        assert_eq!(link_note(url, &words(&["[https://example.org]"])), "");
        // Only the bracketed copy of this very URL is dropped.
        assert_eq!(
            link_note(url, &words(&["[https://other.org]", "read"])),
            "[https://other.org] read"
        );
    }
}
