//! Error types for the node API.

use dwn_node_core::CoreError;
use dwn_node_perms::PermsError;
use thiserror::Error;

/// Errors that can occur during node operations.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Permission error, including scope validation and delegation failures.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The issuer is configured to refuse delegated grants.
    #[error("delegated grants are disabled for issuer {0}")]
    DelegationDisabled(String),

    /// The request asks someone other than this issuer for a grant.
    #[error("request is addressed to {granted_by}, not to issuer {issuer}")]
    RequestNotAddressedToIssuer { granted_by: String, issuer: String },

    /// An override names a grantor other than this issuer.
    #[error("issuer {issuer} cannot sign a grant with grantedBy {granted_by}")]
    GrantorNotIssuer { granted_by: String, issuer: String },

    /// Invalid issuer configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
