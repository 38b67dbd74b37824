//! Error types for the ATM terminal.
//!
//! Only genuine faults live here. Events that are illegal in the current
//! session state and business-rule failures during a transaction are
//! reported as [`crate::Outcome`] values, never as errors.

use thiserror::Error;

/// Result type alias for terminal operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur while operating the terminal.
#[derive(Error, Debug)]
pub enum AtmError {
    /// A card's PIN was accepted but its linked account is not on file.
    #[error("no account {0} on file for the inserted card")]
    UnknownAccount(String),

    /// A monetary amount could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] rust_decimal::Error),
}
