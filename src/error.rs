//! Error types for cipher operations.
//!
//! Input problems and oversized blocks are recoverable and meant to be shown
//! to the user. `NoInverse` and `DerivationFailed` indicate that key
//! derivation could not complete.

use thiserror::Error;

/// Result type alias for cipher operations.
pub type Result<T> = std::result::Result<T, CipherError>;

/// Core error type for cipher operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Rejected before any key derivation work was done
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Block does not fit below the derived modulus, or its encoding
    /// exceeds the allowed length
    #[error("Message too large: {0}. Try a different password or a shorter message")]
    MessageTooLarge(String),

    /// Modular inverse requested for a pair that is not coprime
    #[error("No modular inverse: operands are not coprime")]
    NoInverse,

    /// Prime search gave up
    #[error("Key derivation failed: no probable prime within {candidates} candidates")]
    DerivationFailed { candidates: usize },
}
