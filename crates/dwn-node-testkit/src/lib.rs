//! # DWN Node Testkit
//!
//! Testing utilities for the DWN node.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: URI normalization and scope validation cases with expected outcomes
//! - **Generators**: Proptest strategies for scopes, URIs, and keys
//! - **Fixtures**: Deterministic personas for grant and request scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use dwn_node_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{name}: {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use dwn_node_testkit::generators::url_input;
//! use dwn_node_perms::normalize_protocol_url;
//!
//! proptest! {
//!     #[test]
//!     fn normalization_is_idempotent(input in url_input()) {
//!         let once = normalize_protocol_url(&input);
//!         prop_assert_eq!(normalize_protocol_url(&once), once);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use dwn_node_perms::{PermissionScope, RecordsMethod};
//! use dwn_node_testkit::fixtures::{alice, bob};
//!
//! let (alice, bob) = (alice(), bob());
//! let options = alice.grant_to(&bob, PermissionScope::records(RecordsMethod::Read));
//! assert_eq!(options.granted_to, "did:example:bob");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{alice, bob, carol, multi_party_personas, Persona};
pub use generators::{records_scope, scope, url_input, valid_scope};
pub use vectors::{scope_vectors, url_vectors, verify_all_vectors, ScopeOutcome, ScopeVector, UrlVector};
