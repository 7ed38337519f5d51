//! Signed messages.
//!
//! A [`Message`] pairs a descriptor with an [`Authorization`]. The authorization
//! binds the descriptor's content identifier to a signing key:
//!
//! ```text
//! signature = sign(SIGN_DOMAIN || canonical({ alg, descriptorCid, keyId }))
//! ```
//!
//! Messages are immutable once signed. The identifier of a message is the
//! [`ContentId`] of the whole message (descriptor and authorization).

use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_bytes, signing_input};
use crate::cid::ContentId;
use crate::crypto::Ed25519PublicKey;
use crate::error::{CoreError, Result};
use crate::signer::{did_from_key_id, verify_signature, Signer};

/// Proof that a descriptor was signed by `key_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    /// DID URL of the signing key.
    pub key_id: String,

    /// JWS algorithm name.
    pub alg: String,

    /// Content identifier of the signed descriptor.
    pub descriptor_cid: ContentId,

    /// Raw signature bytes (hex on the wire).
    #[serde(with = "hex")]
    pub signature: Vec<u8>,
}

/// The structure that is actually signed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignaturePayload<'a> {
    alg: &'a str,
    descriptor_cid: &'a ContentId,
    key_id: &'a str,
}

impl Authorization {
    /// Sign `descriptor` with `signer`.
    pub async fn create<D, S>(descriptor: &D, signer: &S) -> Result<Self>
    where
        D: Serialize + ?Sized,
        S: Signer + ?Sized,
    {
        let descriptor_cid = ContentId::compute(descriptor)?;
        let key_id = signer.key_id().to_string();
        let alg = signer.algorithm().to_string();

        let payload = canonical_bytes(&SignaturePayload {
            alg: &alg,
            descriptor_cid: &descriptor_cid,
            key_id: &key_id,
        })?;
        let signature = signer.sign(&signing_input(&payload)).await?;

        Ok(Self {
            key_id,
            alg,
            descriptor_cid,
            signature,
        })
    }

    /// The DID that produced this authorization.
    pub fn author(&self) -> &str {
        did_from_key_id(&self.key_id)
    }

    /// Verify the signature against `public_key`.
    ///
    /// Does not check that `descriptor_cid` matches any descriptor; see
    /// [`Message::verify`].
    pub fn verify_signature(&self, public_key: &Ed25519PublicKey) -> Result<()> {
        let payload = canonical_bytes(&SignaturePayload {
            alg: &self.alg,
            descriptor_cid: &self.descriptor_cid,
            key_id: &self.key_id,
        })?;
        verify_signature(
            &self.alg,
            public_key,
            &signing_input(&payload),
            &self.signature,
        )
    }
}

/// A descriptor with its authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message<D> {
    pub descriptor: D,
    pub authorization: Authorization,
}

impl<D: Serialize> Message<D> {
    /// Sign `descriptor` and wrap it in a message.
    pub async fn sign<S: Signer + ?Sized>(descriptor: D, signer: &S) -> Result<Self> {
        let authorization = Authorization::create(&descriptor, signer).await?;
        Ok(Self {
            descriptor,
            authorization,
        })
    }

    /// The content identifier of this message.
    pub fn content_id(&self) -> Result<ContentId> {
        ContentId::compute(self)
    }

    /// The content identifier of the descriptor alone.
    pub fn descriptor_cid(&self) -> Result<ContentId> {
        ContentId::compute(&self.descriptor)
    }

    /// The DID that signed this message.
    pub fn author(&self) -> &str {
        self.authorization.author()
    }

    /// Check the descriptor against the authorization and verify the signature.
    ///
    /// Returns the author DID on success.
    pub fn verify(&self, public_key: &Ed25519PublicKey) -> Result<&str> {
        let actual = self.descriptor_cid()?;
        if actual != self.authorization.descriptor_cid {
            return Err(CoreError::DescriptorCidMismatch {
                expected: self.authorization.descriptor_cid.to_string(),
                actual: actual.to_string(),
            });
        }

        self.authorization.verify_signature(public_key)?;
        Ok(self.author())
    }
}
