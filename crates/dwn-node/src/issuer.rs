//! The grant issuer: one signing identity, one policy.
//!
//! [`GrantIssuer`] binds a [`Signer`] to an [`IssuerConfig`] and fills in the
//! fields that follow from "who is signing": `grantedBy` for grants and
//! `grantedTo` for requests. Everything else is delegated to
//! [`dwn_node_perms`].

use dwn_node_core::{did_from_key_id, Signer, Timestamp};
use dwn_node_perms::{
    Conditions, GrantOptions, GrantOverrides, PermissionScope, PermissionsGrant,
    PermissionsRequest, RequestOptions,
};

use crate::config::IssuerConfig;
use crate::error::{NodeError, Result};

/// Terms of a grant issued directly by a [`GrantIssuer`].
#[derive(Debug, Clone)]
pub struct GrantTerms {
    pub granted_to: String,
    /// Defaults to the issuer.
    pub granted_for: Option<String>,
    pub scope: PermissionScope,
    /// Defaults to now plus the configured grant lifetime.
    pub date_expires: Option<Timestamp>,
    pub description: Option<String>,
    pub conditions: Option<Conditions>,
    pub delegated: Option<bool>,
}

impl GrantTerms {
    pub fn new(granted_to: impl Into<String>, scope: impl Into<PermissionScope>) -> Self {
        Self {
            granted_to: granted_to.into(),
            granted_for: None,
            scope: scope.into(),
            date_expires: None,
            description: None,
            conditions: None,
            delegated: None,
        }
    }

    pub fn delegated(mut self) -> Self {
        self.delegated = Some(true);
        self
    }
}

/// Terms of a request signed by a [`GrantIssuer`] and addressed to a grantor.
#[derive(Debug, Clone)]
pub struct RequestTerms {
    /// The principal asked to grant.
    pub granted_by: String,
    /// Defaults to `granted_by`.
    pub granted_for: Option<String>,
    pub scope: PermissionScope,
    /// Defaults to now plus the configured grant lifetime.
    pub date_expires: Option<Timestamp>,
    pub description: Option<String>,
    pub conditions: Option<Conditions>,
}

impl RequestTerms {
    pub fn new(granted_by: impl Into<String>, scope: impl Into<PermissionScope>) -> Self {
        Self {
            granted_by: granted_by.into(),
            granted_for: None,
            scope: scope.into(),
            date_expires: None,
            description: None,
            conditions: None,
        }
    }
}

/// Issues requests and grants under a single signing identity.
pub struct GrantIssuer<S: Signer> {
    signer: S,
    config: IssuerConfig,
}

impl<S: Signer> GrantIssuer<S> {
    /// Create an issuer. Fails if `config` is invalid.
    pub fn new(signer: S, config: IssuerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { signer, config })
    }

    /// The issuer's DID, taken from its signer's key id.
    pub fn did(&self) -> &str {
        did_from_key_id(self.signer.key_id())
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Issue a grant from this issuer.
    pub async fn issue(&self, terms: GrantTerms) -> Result<PermissionsGrant> {
        self.check_delegation(terms.delegated)?;

        let issuer = self.did().to_string();
        let options = GrantOptions {
            message_timestamp: None,
            date_expires: terms.date_expires.unwrap_or_else(|| self.default_expiry()),
            description: terms.description,
            granted_for: terms.granted_for.unwrap_or_else(|| issuer.clone()),
            granted_by: issuer,
            granted_to: terms.granted_to,
            scope: terms.scope,
            conditions: terms.conditions,
            delegated: terms.delegated,
        };

        let grant = PermissionsGrant::create(options, &self.signer).await?;
        tracing::debug!(
            issuer = self.did(),
            granted_to = %grant.descriptor().granted_to,
            "issued grant"
        );
        Ok(grant)
    }

    /// Issue a grant answering `request`.
    ///
    /// The request must be addressed to this issuer unless
    /// `overrides.granted_by` redirects it here. The grant's `grantedBy` is
    /// always the issuer.
    pub async fn issue_from_request(
        &self,
        request: &PermissionsRequest,
        overrides: GrantOverrides,
    ) -> Result<PermissionsGrant> {
        if let Some(granted_by) = overrides.granted_by.as_deref() {
            if granted_by != self.did() {
                tracing::warn!(
                    issuer = self.did(),
                    granted_by,
                    "refusing to sign a grant on behalf of another grantor"
                );
                return Err(NodeError::GrantorNotIssuer {
                    granted_by: granted_by.to_string(),
                    issuer: self.did().to_string(),
                });
            }
        } else if request.descriptor().granted_by != self.did() {
            let requested_grantor = &request.descriptor().granted_by;
            tracing::warn!(
                issuer = self.did(),
                granted_by = %requested_grantor,
                "refusing request addressed to another grantor"
            );
            return Err(NodeError::RequestNotAddressedToIssuer {
                granted_by: requested_grantor.clone(),
                issuer: self.did().to_string(),
            });
        }
        self.check_delegation(overrides.delegated)?;

        let grant = PermissionsGrant::create_from_permissions_request(
            request.message(),
            &self.signer,
            overrides,
        )
        .await?;
        tracing::debug!(
            issuer = self.did(),
            request_id = ?grant.descriptor().permissions_request_id,
            "issued grant from request"
        );
        Ok(grant)
    }

    /// Sign a request asking `terms.granted_by` for a grant to this issuer.
    pub async fn request(&self, terms: RequestTerms) -> Result<PermissionsRequest> {
        let options = RequestOptions {
            message_timestamp: None,
            date_expires: terms.date_expires.unwrap_or_else(|| self.default_expiry()),
            description: terms.description,
            granted_for: terms
                .granted_for
                .unwrap_or_else(|| terms.granted_by.clone()),
            granted_by: terms.granted_by,
            granted_to: self.did().to_string(),
            scope: terms.scope,
            conditions: terms.conditions,
        };

        Ok(PermissionsRequest::create(options, &self.signer).await?)
    }

    fn check_delegation(&self, delegated: Option<bool>) -> Result<()> {
        if delegated == Some(true) && !self.config.allow_delegation {
            tracing::warn!(issuer = self.did(), "delegated grant refused by config");
            return Err(NodeError::DelegationDisabled(self.did().to_string()));
        }
        Ok(())
    }

    fn default_expiry(&self) -> Timestamp {
        Timestamp::offset_from_now(self.config.default_grant_ttl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwn_node_core::{Ed25519Signer, Keypair};
    use dwn_node_perms::RecordsMethod;

    fn issuer(config: IssuerConfig) -> GrantIssuer<Ed25519Signer> {
        let signer = Ed25519Signer::new("did:example:alice#key1", Keypair::from_seed(&[1; 32]));
        GrantIssuer::new(signer, config).unwrap()
    }

    #[test]
    fn test_issuer_did() {
        assert_eq!(issuer(IssuerConfig::default()).did(), "did:example:alice");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let signer = Ed25519Signer::new("did:example:alice#key1", Keypair::from_seed(&[1; 32]));
        let config = IssuerConfig {
            default_grant_ttl_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            GrantIssuer::new(signer, config),
            Err(NodeError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_issue_fills_issuer_fields() {
        let issuer = issuer(IssuerConfig::default());
        let before = Timestamp::now();
        let grant = issuer
            .issue(GrantTerms::new(
                "did:example:bob",
                PermissionScope::records(RecordsMethod::Read),
            ))
            .await
            .unwrap();

        let descriptor = grant.descriptor();
        assert_eq!(descriptor.granted_by, "did:example:alice");
        assert_eq!(descriptor.granted_for, "did:example:alice");
        assert_eq!(descriptor.granted_to, "did:example:bob");
        assert!(descriptor.date_expires > before.offset(chrono::Duration::days(29)));
        assert!(grant.verify_grantor().is_ok());
    }

    #[tokio::test]
    async fn test_grantor_override_must_be_issuer() {
        let issuer = issuer(IssuerConfig::default());
        let requester = Ed25519Signer::new("did:example:bob#key1", Keypair::from_seed(&[2; 32]));
        let request = PermissionsRequest::create(
            RequestOptions {
                message_timestamp: None,
                date_expires: Timestamp::offset_from_now(chrono::Duration::days(1)),
                description: None,
                granted_by: "did:example:alice".into(),
                granted_to: "did:example:bob".into(),
                granted_for: "did:example:alice".into(),
                scope: PermissionScope::records(RecordsMethod::Read),
                conditions: None,
            },
            &requester,
        )
        .await
        .unwrap();

        let result = issuer
            .issue_from_request(
                &request,
                GrantOverrides {
                    granted_by: Some("did:example:carol".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(
            result,
            Err(NodeError::GrantorNotIssuer { ref granted_by, .. }) if granted_by == "did:example:carol"
        ));

        let grant = issuer
            .issue_from_request(
                &request,
                GrantOverrides {
                    granted_by: Some("did:example:alice".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(grant.verify_grantor().is_ok());
    }

    #[tokio::test]
    async fn test_delegation_disabled() {
        let issuer = issuer(IssuerConfig {
            allow_delegation: false,
            ..Default::default()
        });
        let result = issuer
            .issue(
                GrantTerms::new("did:example:bob", PermissionScope::records(RecordsMethod::Write))
                    .delegated(),
            )
            .await;
        assert!(matches!(result, Err(NodeError::DelegationDisabled(_))));
    }
}
