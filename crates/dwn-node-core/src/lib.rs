//! # DWN Node Core
//!
//! Pure primitives for the DWN node: canonical encoding, content identifiers,
//! signing, and timestamps.
//!
//! This crate contains no storage and no networking. The only suspension point
//! is the injected [`Signer`].
//!
//! ## Key Types
//!
//! - [`Message`] - A descriptor plus its [`Authorization`]
//! - [`ContentId`] - Content-addressed identifier (CIDv1, dag-cbor, sha2-256)
//! - [`Signer`] - The signing capability, with [`Ed25519Signer`] as the local implementation
//! - [`Timestamp`] - Microsecond UTC timestamps in their wire form
//!
//! ## Canonicalization
//!
//! Everything that is hashed or signed is encoded using deterministic CBOR.
//! See the [`canonical`] module.

pub mod canonical;
pub mod cid;
pub mod crypto;
pub mod error;
pub mod message;
pub mod signer;
pub mod time;
pub mod types;

pub use canonical::{canonical_bytes, signing_input, SIGN_DOMAIN};
pub use cid::ContentId;
pub use crypto::{Ed25519PublicKey, Keypair, Sha256Hash};
pub use error::{CoreError, Result, SignError};
pub use message::{Authorization, Message};
pub use signer::{did_from_key_id, verify_signature, Ed25519Signer, Signer, ALG_EDDSA};
pub use time::Timestamp;
pub use types::Interface;
