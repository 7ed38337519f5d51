//! Error types for the DWN node core.

use thiserror::Error;

/// Core errors that can occur while encoding, hashing, or verifying messages.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("descriptor CID mismatch: expected {expected}, got {actual}")]
    DescriptorCidMismatch { expected: String, actual: String },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid content identifier: {0}")]
    InvalidContentId(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error(transparent)]
    Signer(#[from] SignError),
}

/// Errors raised by a [`Signer`](crate::signer::Signer).
///
/// These are surfaced to callers unchanged.
#[derive(Debug, Error)]
pub enum SignError {
    /// The signing key is not available or cannot be used.
    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),

    /// An error occurred during the signing operation.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
