//! # DWN Node
//!
//! The node-facing API for permission requests, grants, and delegated grants.
//!
//! ## Overview
//!
//! A [`GrantIssuer`] wraps a signing identity and an [`IssuerConfig`]:
//!
//! - **Requests**: ask another principal for access to their data store
//! - **Grants**: authorize a principal within a scope, until an expiry date
//! - **Derived grants**: answer a request, copying its terms unless overridden
//! - **Delegated grants**: let the grantee act with the grantor's authority
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dwn_node::{GrantIssuer, GrantTerms, IssuerConfig};
//! use dwn_node::core::{Ed25519Signer, Keypair};
//! use dwn_node::perms::{RecordsMethod, RecordsScope};
//!
//! async fn example() -> dwn_node::Result<()> {
//!     let signer = Ed25519Signer::new("did:example:alice#key1", Keypair::generate());
//!     let issuer = GrantIssuer::new(signer, IssuerConfig::default())?;
//!
//!     let scope = RecordsScope::new(RecordsMethod::Write).with_protocol("example.com/chat");
//!     let grant = issuer.issue(GrantTerms::new("did:example:bob", scope)).await?;
//!     assert_eq!(grant.descriptor().granted_by, "did:example:alice");
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `dwn_node::core` - Canonical encoding, content ids, signing, timestamps
//! - `dwn_node::perms` - Scopes, requests, grants, delegated grants

pub mod config;
pub mod error;
pub mod issuer;

// Re-export component crates
pub use dwn_node_core as core;
pub use dwn_node_perms as perms;

pub use config::{IssuerConfig, DEFAULT_GRANT_TTL_SECS};
pub use error::{NodeError, Result};
pub use issuer::{GrantIssuer, GrantTerms, RequestTerms};

// Re-export commonly used types
pub use dwn_node_core::{ContentId, Ed25519Signer, Keypair, Signer, Timestamp};
pub use dwn_node_perms::{
    DelegatedGrant, GrantOverrides, PermissionScope, PermissionsGrant, PermissionsRequest,
    RecordsMethod, RecordsScope,
};
