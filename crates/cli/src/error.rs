//! CLI errors.

use lca_tv_client::{ApiError, ConfigError, SessionStoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Backend configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Session file could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionStoreError),

    /// Backend call failed.
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    /// The command needs a signed-in admin.
    #[error("Not signed in. Run `lca-cli login -u <username>` first")]
    NotLoggedIn,

    /// Invalid command argument.
    #[error("Invalid {0}: {1}")]
    InvalidArgument(&'static str, String),

    /// Writing to the terminal failed.
    #[error("Terminal output failed: {0}")]
    Output(#[from] std::io::Error),
}
