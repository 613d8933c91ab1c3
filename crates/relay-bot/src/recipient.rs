//! Recipient selectors (`@public`, `@all`, `@set_<name>`, `@<username>`).

use crate::commands::Failure;
use crate::remote::RemoteSession;

/// Selectors passed to the service as-is, minus the leading `@`.
const SCOPE_PREFIXES: [&str; 4] = ["@public", "@all", "@friend_", "@set_"];

/// A recipient selector token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Broadcast scope or named set, already stripped of `@`.
    Scope(&'a str),
    /// A single user, looked up by username.
    User(&'a str),
    /// A lone `@`.
    Empty,
}

impl<'a> Selector<'a> {
    /// Parse a token; `None` if it is not a selector at all.
    pub fn parse(token: &'a str) -> Option<Self> {
        if SCOPE_PREFIXES.iter().any(|prefix| token.starts_with(prefix)) {
            return Some(Selector::Scope(&token[1..]));
        }

        match token.strip_prefix('@') {
            Some("") => Some(Selector::Empty),
            Some(username) => Some(Selector::User(username)),
            None => None,
        }
    }
}

/// Split an argument list into an optional leading selector and the rest.
pub fn split_selector(args: &[String]) -> (Option<Selector<'_>>, &[String]) {
    match args.split_first() {
        Some((first, rest)) => match Selector::parse(first) {
            Some(selector) => (Some(selector), rest),
            None => (None, args),
        },
        None => (None, args),
    }
}

/// Turn a selector into the service's recipient id, asking the service for
/// the user's default when there is none.
///
/// Callers reject `Selector::Empty` before authenticating; reaching it here
/// is a bug in the caller.
pub async fn resolve(
    selector: Option<Selector<'_>>,
    session: &dyn RemoteSession,
) -> Result<String, Failure> {
    match selector {
        Some(Selector::Scope(scope)) => Ok(scope.to_string()),
        Some(Selector::User(username)) => {
            let id = session.lookup_user_id(username).await?;
            Ok(format!("friend_{}", id))
        }
        Some(Selector::Empty) => Err(Failure::Unexpected("empty recipient selector".into())),
        None => Ok(session.default_recipient().await?),
    }
}
