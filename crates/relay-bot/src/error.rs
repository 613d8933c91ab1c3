//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Startup error: {0}")]
    Startup(#[from] anyhow::Error),

    #[error("Account store error: {0}")]
    Store(#[from] account_store::StoreError),

    #[error("Notes service error: {0}")]
    Notes(#[from] notes_client::NotesError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] xmpp_gateway::GatewayError),

    #[error("Command registry error: {0}")]
    Registry(#[from] crate::registry::RegistryError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
