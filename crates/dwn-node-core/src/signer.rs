//! The signing capability.
//!
//! A [`Signer`] is injected into every operation that produces a signed message.
//! It is borrowed for the duration of one call and never retained.

use async_trait::async_trait;

use crate::crypto::{Ed25519PublicKey, Keypair};
use crate::error::{CoreError, SignError};

/// JWS algorithm name for Ed25519.
pub const ALG_EDDSA: &str = "EdDSA";

/// An identity that can sign payloads.
///
/// `key_id` is a DID URL (`did:method:id#fragment`); the DID part is the
/// identity that authored whatever this signer signs.
#[async_trait]
pub trait Signer: Send + Sync {
    /// The DID URL of the signing key.
    fn key_id(&self) -> &str;

    /// The signature algorithm, as a JWS `alg` name.
    fn algorithm(&self) -> &str;

    /// Sign the given payload.
    async fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SignError>;
}

/// The DID that owns `key_id` (everything before the first `#`).
pub fn did_from_key_id(key_id: &str) -> &str {
    key_id.split_once('#').map_or(key_id, |(did, _)| did)
}

/// Verify a signature produced by a [`Signer`] using `algorithm`.
pub fn verify_signature(
    algorithm: &str,
    public_key: &Ed25519PublicKey,
    payload: &[u8],
    signature: &[u8],
) -> Result<(), CoreError> {
    match algorithm {
        ALG_EDDSA => public_key.verify(payload, signature),
        other => Err(CoreError::UnsupportedAlgorithm(other.to_string())),
    }
}

/// A local Ed25519 signer.
#[derive(Debug, Clone)]
pub struct Ed25519Signer {
    key_id: String,
    keypair: Keypair,
}

impl Ed25519Signer {
    /// Create a signer for `key_id` backed by `keypair`.
    pub fn new(key_id: impl Into<String>, keypair: Keypair) -> Self {
        Self {
            key_id: key_id.into(),
            keypair,
        }
    }

    /// The public half of the signing key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// The DID this signer signs for.
    pub fn did(&self) -> &str {
        did_from_key_id(&self.key_id)
    }
}

#[async_trait]
impl Signer for Ed25519Signer {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn algorithm(&self) -> &str {
        ALG_EDDSA
    }

    async fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, SignError> {
        Ok(self.keypair.sign(payload).to_vec())
    }
}
