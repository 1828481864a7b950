//! Error types for the invite crates.

use thiserror::Error;

/// Errors that can occur while building an invitation.
///
/// Only construction can fail. Once an [`Event`](crate::event::Event) exists,
/// calendar export, links and the countdown are total.
#[derive(Error, Debug)]
pub enum InviteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for invite operations.
pub type InviteResult<T> = Result<T, InviteError>;
