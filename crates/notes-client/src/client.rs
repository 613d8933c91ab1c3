//! Notes service HTTP client.

use crate::error::NotesError;
use crate::types::*;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Notes service client.
///
/// The application key is stored using `SecretString` to prevent accidental
/// exposure in logs or debug output.
#[derive(Clone)]
pub struct NotesClient {
    client: Client,
    base_url: String,
    app_key: SecretString,
}

impl NotesClient {
    /// Create a new notes client.
    pub fn new(
        base_url: impl Into<String>,
        app_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotesError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_key: SecretString::new(app_key.into()),
        })
    }

    /// Base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Authenticate a username/password pair.
    ///
    /// The service has no login endpoint, so the credentials are checked by
    /// fetching the user's own profile with them. Any failure counts as a
    /// rejected credential.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        username: &str,
        password: impl Into<String>,
    ) -> Result<Session, NotesError> {
        let session = Session {
            api: self.clone(),
            username: username.to_string(),
            password: SecretString::new(password.into()),
        };

        match session.get_user(username).await {
            Ok(user) => {
                debug!("Authenticated {} (id {})", user.username, user.id);
                Ok(session)
            }
            Err(e) => {
                warn!("Login for {} failed: {}", username, e);
                Err(NotesError::AuthenticationRequired)
            }
        }
    }

    /// Health check - returns true if the API host answers at all.
    pub async fn health_check(&self) -> bool {
        self.client.get(&self.base_url).send().await.is_ok()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Handle HTTP response, converting errors appropriately.
    ///
    /// The API sometimes reports failures in the body of a 200 response, so
    /// successful bodies are checked for an error envelope first.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NotesError> {
        let status = response.status();
        let body = response.text().await?;
        debug!("Response {}: {}", status, preview(&body, 200));

        if let Ok(envelope) = serde_json::from_str::<ErrorBody>(&body) {
            return Err(NotesError::from_status(
                envelope.error.status_code,
                envelope.error.message,
            ));
        }

        if !status.is_success() {
            return Err(NotesError::from_status(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(NotesError::from)
    }
}

/// An authenticated session bound to one user's credentials.
#[derive(Clone)]
pub struct Session {
    api: NotesClient,
    username: String,
    password: SecretString,
}

impl Session {
    /// The authenticated username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetch a user profile.
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Result<User, NotesError> {
        let path = format!("users/{}.json", encode(username));
        let response = self.authorized(self.api.client.get(self.api.url(&path))).send().await?;

        self.api.handle_response(response).await
    }

    /// Fetch the recipient the user has selected as default.
    #[instrument(skip(self))]
    pub async fn default_recipient(&self) -> Result<String, NotesError> {
        let response = self
            .authorized(self.api.client.get(self.api.url("send/send_to.json")))
            .send()
            .await?;

        let send_to: SendTo = self.api.handle_response(response).await?;
        send_to.selected.ok_or_else(|| NotesError::Api {
            status: 200,
            message: "No default recipient selected".into(),
        })
    }

    /// Post a text note.
    #[instrument(skip(self, body))]
    pub async fn post_message(&self, to: &str, body: &str) -> Result<Note, NotesError> {
        let response = self
            .authorized(self.api.client.post(self.api.url("send/message.json")))
            .form(&[("note_to", to), ("note_body", body)])
            .send()
            .await?;

        self.api.handle_response(response).await
    }

    /// Post a link with an optional note (empty string for none).
    #[instrument(skip(self, body))]
    pub async fn post_link(&self, to: &str, url: &str, body: &str) -> Result<Note, NotesError> {
        let response = self
            .authorized(self.api.client.post(self.api.url("send/link.json")))
            .form(&[("note_to", to), ("url", url), ("note_body", body)])
            .send()
            .await?;

        self.api.handle_response(response).await
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .query(&[("app_key", self.api.app_key.expose_secret().as_str())])
    }
}

/// At most `max` characters of a response body, cut on a char boundary.
fn preview(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
