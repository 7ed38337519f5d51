//! Test fixtures and helpers.
//!
//! Deterministic personas and option builders for grant and request tests.

use chrono::Duration;

use dwn_node_core::{Ed25519PublicKey, Ed25519Signer, Keypair, Timestamp};
use dwn_node_perms::{GrantOptions, PermissionScope, RequestOptions};

/// A named principal with a deterministic signing key.
pub struct Persona {
    pub signer: Ed25519Signer,
}

impl Persona {
    /// A persona `did:example:<name>` whose key is derived from `seed`.
    pub fn with_seed(name: &str, seed: [u8; 32]) -> Self {
        Self {
            signer: Ed25519Signer::new(
                format!("did:example:{name}#key1"),
                Keypair::from_seed(&seed),
            ),
        }
    }

    pub fn did(&self) -> &str {
        self.signer.did()
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.signer.public_key()
    }

    /// Options for a grant from this persona to `grantee` over this persona's
    /// own data, expiring in one day.
    pub fn grant_to(&self, grantee: &Persona, scope: impl Into<PermissionScope>) -> GrantOptions {
        GrantOptions {
            message_timestamp: None,
            date_expires: one_day_from_now(),
            description: None,
            granted_by: self.did().to_string(),
            granted_to: grantee.did().to_string(),
            granted_for: self.did().to_string(),
            scope: scope.into(),
            conditions: None,
            delegated: None,
        }
    }

    /// Options for a request from this persona asking `grantor` for access to
    /// the grantor's data, expiring in one day.
    pub fn request_from(
        &self,
        grantor: &Persona,
        scope: impl Into<PermissionScope>,
    ) -> RequestOptions {
        RequestOptions {
            message_timestamp: None,
            date_expires: one_day_from_now(),
            description: None,
            granted_by: grantor.did().to_string(),
            granted_to: self.did().to_string(),
            granted_for: grantor.did().to_string(),
            scope: scope.into(),
            conditions: None,
        }
    }
}

pub fn alice() -> Persona {
    Persona::with_seed("alice", [0xA1; 32])
}

pub fn bob() -> Persona {
    Persona::with_seed("bob", [0xB0; 32])
}

pub fn carol() -> Persona {
    Persona::with_seed("carol", [0xC0; 32])
}

/// Create `count` distinct personas for multi-party tests.
pub fn multi_party_personas(count: usize) -> Vec<Persona> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            Persona::with_seed(&format!("party{i}"), seed)
        })
        .collect()
}

fn one_day_from_now() -> Timestamp {
    Timestamp::offset_from_now(Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwn_node_perms::{PermissionsGrant, PermissionsRequest, RecordsMethod};

    #[test]
    fn test_personas_are_distinct() {
        let parties = multi_party_personas(3);

        let pks: Vec<_> = parties.iter().map(|p| p.public_key()).collect();
        assert_ne!(pks[0], pks[1]);
        assert_ne!(pks[1], pks[2]);
        assert_ne!(pks[0], pks[2]);
        assert_eq!(parties[2].did(), "did:example:party2");
    }

    #[tokio::test]
    async fn test_grant_fixture_signs() {
        let (alice, bob) = (alice(), bob());
        let grant = PermissionsGrant::create(
            alice.grant_to(&bob, PermissionScope::records(RecordsMethod::Read)),
            &alice.signer,
        )
        .await
        .unwrap();

        assert_eq!(grant.verify(&alice.public_key()).unwrap(), "did:example:alice");
        assert_eq!(grant.descriptor().granted_to, "did:example:bob");
    }

    #[tokio::test]
    async fn test_request_fixture_signs() {
        let (alice, bob) = (alice(), bob());
        let request = PermissionsRequest::create(
            bob.request_from(&alice, PermissionScope::records(RecordsMethod::Write)),
            &bob.signer,
        )
        .await
        .unwrap();

        assert_eq!(request.author(), "did:example:bob");
        assert_eq!(request.descriptor().granted_by, "did:example:alice");
    }
}
