//! Notes service API types.

use serde::Deserialize;

/// A user profile.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

/// Recipient options for the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct SendTo {
    #[serde(default)]
    pub selected: Option<String>,
}

/// A posted note, as echoed back by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

/// Error body returned by the API, sometimes with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
}
