//! Greeting command - answers "hi" with a greeting in some language.

use crate::commands::{Command, CommandDescriptor, Invocation, Outcome};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Mutex;

/// Greeting words. Each one is also a keyword for this command.
pub const GREETINGS: &[&str] = &[
    "hi", "oi", "yo", "hei", "hej", "hey", "ahoi", "ahoj", "tach", "aloha", "hallo", "hello",
    "howdy", "salam", "salut", "ni hao", "servus", "shalom", "bonjour", "merhaba", "namaste",
];

pub struct GreetingCommand {
    rng: Mutex<StdRng>,
    descriptor: CommandDescriptor,
}

impl GreetingCommand {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            descriptor: CommandDescriptor::new("greeting", "Sends a greeting.")
                .with_aliases(GREETINGS),
        }
    }

    fn pick(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        GREETINGS.choose(&mut *rng).copied().unwrap_or("hello")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl Command for GreetingCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: &Invocation<'_>) -> Outcome {
        Outcome::Reply(format!("{}!", capitalize(self.pick())))
    }
}
