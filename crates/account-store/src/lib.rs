//! Persistent mapping from chat identity to notes-service credentials.

mod error;
mod store;
mod types;

pub use error::StoreError;
pub use store::AccountStore;
pub use types::*;
