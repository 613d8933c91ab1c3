//! Common test utilities for integration tests.

#![allow(dead_code)]

use account_store::AccountStore;
use notes_client::NotesClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use relay_bot::{BotContext, CommandRegistry, Dispatcher, Notification};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ALICE_JID: &str = "alice@example.org/laptop";

/// Create a notes client configured for a mock server.
pub fn test_notes_client(mock_server: &MockServer) -> NotesClient {
    NotesClient::new(mock_server.uri(), "test-app-key", Duration::from_secs(5)).unwrap()
}

/// Answer profile lookups for `alice` (password `secret1`, id 42).
pub async fn mount_alice(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/alice.json"))
        .and(wiremock::matchers::header(
            "Authorization",
            "Basic YWxpY2U6c2VjcmV0MQ==",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "username": "alice"
        })))
        .mount(mock_server)
        .await;

    // Any other credentials are refused.
    Mock::given(method("GET"))
        .and(path("/users/alice.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"status_code": 401, "message": "Authentication required"}
        })))
        .mount(mock_server)
        .await;
}

/// A dispatcher wired to a mock notes service and the given store.
pub fn test_dispatcher(
    mock_server: &MockServer,
    store: AccountStore,
    seed: u64,
) -> (Dispatcher, UnboundedReceiver<Notification>) {
    let ctx = Arc::new(BotContext::new(
        store,
        Arc::new(test_notes_client(mock_server)),
        "Pownce",
        "I'm a jabber bot.",
    ));
    let registry = CommandRegistry::build(ctx, StdRng::seed_from_u64(seed)).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher::new(Arc::new(registry), tx), rx)
}
