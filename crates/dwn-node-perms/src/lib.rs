//! # DWN Node Permissions
//!
//! Permission scopes, requests, grants, and delegated grants.
//!
//! ## Overview
//!
//! A grant authorizes one principal to act on another principal's data store
//! within a bounded scope until an expiry date. Grants are signed messages;
//! once created they are immutable.
//!
//! ## Key Concepts
//!
//! - **Scope**: What interface and method a grant covers, optionally narrowed
//!   by schema, protocol, context, or protocol path
//! - **Request**: A signed ask for a grant, addressed to the would-be grantor
//! - **Grant**: The signed authorization itself
//! - **Delegated grant**: A grant with `delegated: true`, letting the grantee
//!   act with the grantor's authority
//!
//! ## Scope Rules
//!
//! Records scopes obey two exclusions:
//!
//! 1. `schema` excludes `protocol`, `contextId` and `protocolPath`
//! 2. `contextId` excludes `protocolPath`
//!
//! `protocol` and `schema` URIs are normalized before validation and signing.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dwn_node_core::{Ed25519Signer, Keypair, Timestamp};
//! use dwn_node_perms::{GrantOptions, PermissionsGrant, RecordsMethod, RecordsScope};
//!
//! # async fn demo() -> dwn_node_perms::Result<()> {
//! let alice = Ed25519Signer::new("did:example:alice#key1", Keypair::generate());
//! let grant = PermissionsGrant::create(
//!     GrantOptions {
//!         message_timestamp: None,
//!         date_expires: Timestamp::offset_from_now(chrono::Duration::days(1)),
//!         description: None,
//!         granted_by: "did:example:alice".into(),
//!         granted_to: "did:example:bob".into(),
//!         granted_for: "did:example:alice".into(),
//!         scope: RecordsScope::new(RecordsMethod::Write)
//!             .with_protocol("example.com/chat")
//!             .into(),
//!         conditions: None,
//!         delegated: Some(true),
//!     },
//!     &alice,
//! )
//! .await?;
//!
//! let delegated = grant.as_delegated_grant()?;
//! assert_eq!(delegated.delegate(), "did:example:bob");
//! # Ok(())
//! # }
//! ```

pub mod delegated;
pub mod error;
pub mod grant;
pub mod request;
pub mod scope;
pub mod uri;

pub use delegated::DelegatedGrant;
pub use error::{PermsError, Result};
pub use grant::{GrantDescriptor, GrantMessage, GrantOptions, GrantOverrides, PermissionsGrant};
pub use request::{PermissionsRequest, RequestDescriptor, RequestMessage, RequestOptions};
pub use scope::{
    validate_scope, Conditions, MessagesMethod, PermissionScope, PermissionsMethod,
    ProtocolsMethod, Publication, RecordsMethod, RecordsScope,
};
pub use uri::{
    normalize_protocol_url, normalize_schema_url, validate_protocol_url_normalized,
    validate_schema_url_normalized,
};
