//! Keyword to command lookup table.

use crate::commands::*;
use crate::context::BotContext;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Keyword '{keyword}' claimed by both '{first}' and '{second}'")]
    Collision {
        keyword: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Registry of available commands, keyed by name and aliases.
///
/// Built once at startup and read-only afterwards.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
    keywords: HashMap<String, usize>,
    unknown: Arc<dyn Command>,
}

impl CommandRegistry {
    /// Create an empty registry that answers everything with `unknown`.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            keywords: HashMap::new(),
            unknown: Arc::new(UnknownCommand::new()),
        }
    }

    /// Register a command under its name and every alias.
    ///
    /// Nothing is added if any keyword is already taken.
    pub fn register(&mut self, command: Arc<dyn Command>) -> Result<(), RegistryError> {
        let descriptor = command.descriptor();
        let keywords: Vec<String> = std::iter::once(descriptor.name)
            .chain(descriptor.aliases.iter().copied())
            .map(str::to_lowercase)
            .collect();

        for keyword in &keywords {
            if let Some(&index) = self.keywords.get(keyword) {
                return Err(RegistryError::Collision {
                    keyword: keyword.clone(),
                    first: self.commands[index].descriptor().name,
                    second: descriptor.name,
                });
            }
        }

        let index = self.commands.len();
        self.commands.push(command);
        for keyword in keywords {
            self.keywords.insert(keyword, index);
        }
        Ok(())
    }

    /// Find a command by keyword, case-insensitively.
    pub fn lookup(&self, keyword: &str) -> Option<&Arc<dyn Command>> {
        self.keywords
            .get(&keyword.to_lowercase())
            .map(|&index| &self.commands[index])
    }

    /// Like `lookup`, but falls back to the unknown-command handler.
    pub fn resolve(&self, keyword: &str) -> &Arc<dyn Command> {
        self.lookup(keyword).unwrap_or(&self.unknown)
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    /// One synopsis line per help-visible command, sorted by name.
    pub fn help_listing(&self) -> String {
        let mut listed: Vec<&CommandDescriptor> = self
            .commands
            .iter()
            .map(|command| command.descriptor())
            .filter(|descriptor| descriptor.help_visible)
            .collect();
        listed.sort_by_key(|descriptor| descriptor.name);

        listed
            .iter()
            .map(|descriptor| descriptor.synopsis())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The bot's full command table.
    pub fn build(ctx: Arc<BotContext>, rng: StdRng) -> Result<Self, RegistryError> {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(HelpCommand::new(ctx.clone())),
            Arc::new(RegisterCommand::new(ctx.clone())),
            Arc::new(UnregisterCommand::new(ctx.clone())),
            Arc::new(MessageCommand::new(ctx.clone())),
            Arc::new(LinkCommand::new(ctx.clone())),
            Arc::new(AboutCommand::new(ctx)),
            Arc::new(GreetingCommand::new(rng)),
            Arc::new(PingCommand::new()),
        ];

        let mut registry = Self::new();
        for command in commands {
            registry.register(command)?;
        }
        Ok(registry)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_context;
    use async_trait::async_trait;
    use rand::SeedableRng;

    struct Dummy {
        descriptor: CommandDescriptor,
    }

    impl Dummy {
        fn new(name: &'static str, aliases: &'static [&'static str]) -> Arc<dyn Command> {
            Arc::new(Self {
                descriptor: CommandDescriptor::new(name, "dummy").with_aliases(aliases),
            })
        }
    }

    #[async_trait]
    impl Command for Dummy {
        fn descriptor(&self) -> &CommandDescriptor {
            &self.descriptor
        }

        async fn execute(&self, _invocation: &Invocation<'_>) -> Outcome {
            Outcome::Reply(self.descriptor.name.into())
        }
    }

    fn standard() -> CommandRegistry {
        let (ctx, _remote) = test_context();
        CommandRegistry::build(ctx, StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn test_lookup_by_name_and_alias() {
        let registry = standard();

        assert_eq!(registry.lookup("register").unwrap().descriptor().name, "register");
        assert_eq!(registry.lookup("signup").unwrap().descriptor().name, "register");
        assert_eq!(registry.lookup("LOGON").unwrap().descriptor().name, "register");
        assert_eq!(registry.lookup("wtf").unwrap().descriptor().name, "help");
        assert_eq!(registry.lookup("url").unwrap().descriptor().name, "link");
        assert_eq!(registry.lookup("msg").unwrap().descriptor().name, "message");
        assert_eq!(registry.lookup("hej").unwrap().descriptor().name, "greeting");
        assert_eq!(registry.lookup("ni hao").unwrap().descriptor().name, "greeting");
    }

    #[test]
    fn test_unknown_is_fallback_only() {
        let registry = standard();

        assert!(registry.lookup("unknown").is_none());
        assert_eq!(registry.resolve("frobnicate").descriptor().name, "unknown");
        assert_eq!(registry.resolve("unknown").descriptor().name, "unknown");
    }

    #[test]
    fn test_collision_rejected() {
        let mut registry = CommandRegistry::new();
        registry.register(Dummy::new("alpha", &["a"])).unwrap();

        let err = registry.register(Dummy::new("beta", &["b", "A"])).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Collision {
                keyword: "a".into(),
                first: "alpha",
                second: "beta",
            }
        );
        // The rejected command left nothing behind.
        assert!(registry.lookup("b").is_none());
        assert_eq!(registry.commands().len(), 1);
    }

    #[test]
    fn test_help_listing_sorted_and_filtered() {
        let registry = standard();
        let listing = registry.help_listing();
        let names: Vec<&str> = listing
            .lines()
            .map(|line| line.split_whitespace().next().unwrap())
            .collect();

        assert_eq!(
            names,
            vec!["about", "help", "link", "message", "register", "unregister"]
        );
        assert!(listing.contains("register USERNAME PASSWORD"));
        assert!(!listing.contains("ping"));
        assert!(!listing.contains("greeting"));
    }
}
