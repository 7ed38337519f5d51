//! Error types for the permissions module.

use thiserror::Error;

/// Errors that can occur during permission operations.
#[derive(Debug, Error)]
pub enum PermsError {
    /// A records scope combines `schema` with protocol-tree fields.
    #[error("permission scope cannot combine `schema` with `protocol`, `contextId` or `protocolPath`")]
    ScopeSchemaProhibitedFields,

    /// A records scope sets both `contextId` and `protocolPath`.
    #[error("permission scope cannot set both `contextId` and `protocolPath`")]
    ScopeContextIdAndProtocolPath,

    /// Delegation was requested from a grant that is not delegated.
    #[error("grant is not a delegated grant: {0}")]
    NotADelegatedGrant(String),

    /// A protocol URL is not in canonical form.
    #[error("protocol URI {0} must be normalized")]
    UrlProtocolNotNormalized(String),

    /// A schema URL is not in canonical form.
    #[error("schema URI {0} must be normalized")]
    UrlSchemaNotNormalized(String),

    /// The descriptor's interface/method pair is not the one expected.
    #[error("unexpected descriptor: expected {expected}, got {actual}")]
    UnexpectedDescriptor { expected: String, actual: String },

    /// The grant was not signed by its `grantedBy` principal.
    #[error("grant was signed by {author} but grantedBy is {granted_by}")]
    GrantedByMismatch { author: String, granted_by: String },

    /// Core error, including signer failures.
    #[error(transparent)]
    Core(#[from] dwn_node_core::CoreError),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
