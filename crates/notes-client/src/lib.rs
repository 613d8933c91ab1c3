//! Client for the notes service's JSON API.

mod client;
mod error;
mod types;

pub use client::{NotesClient, Session};
pub use error::NotesError;
pub use types::*;
