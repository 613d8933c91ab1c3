//! Seam between command handlers and the notes service.

use async_trait::async_trait;
use notes_client::{Note, NotesClient, NotesError, Session};

/// Authenticates credentials against the notes service.
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Check a username/password pair and open a session with it.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn RemoteSession>, NotesError>;
}

/// Operations available to an authenticated user.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Numeric id of a user, for direct messages.
    async fn lookup_user_id(&self, username: &str) -> Result<u64, NotesError>;

    /// The recipient the user picked as default on the service.
    async fn default_recipient(&self) -> Result<String, NotesError>;

    async fn post_note(&self, to: &str, body: &str) -> Result<Note, NotesError>;

    async fn post_link(&self, to: &str, url: &str, note: &str) -> Result<Note, NotesError>;
}

#[async_trait]
impl RemoteService for NotesClient {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn RemoteSession>, NotesError> {
        let session = self.login(username, password).await?;
        Ok(Box::new(session))
    }
}

#[async_trait]
impl RemoteSession for Session {
    async fn lookup_user_id(&self, username: &str) -> Result<u64, NotesError> {
        Session::get_user(self, username).await.map(|user| user.id)
    }

    async fn default_recipient(&self) -> Result<String, NotesError> {
        Session::default_recipient(self).await
    }

    async fn post_note(&self, to: &str, body: &str) -> Result<Note, NotesError> {
        Session::post_message(self, to, body).await
    }

    async fn post_link(&self, to: &str, url: &str, note: &str) -> Result<Note, NotesError> {
        Session::post_link(self, to, url, note).await
    }
}
