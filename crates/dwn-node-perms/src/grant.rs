//! Permission grants.
//!
//! A grant authorizes `grantedTo` to act on `grantedFor`'s data store within
//! `scope`, until `dateExpires`. Grants are signed at construction and never
//! modified afterwards. There are two ways to build one:
//!
//! - [`PermissionsGrant::create`] from explicit fields
//! - [`PermissionsGrant::create_from_permissions_request`] from a prior request,
//!   with per-field overrides
//!
//! Both paths normalize the scope URIs and validate the scope before anything
//! is signed. A rejected scope produces no message at all.

use serde::{Deserialize, Serialize};

use dwn_node_core::{ContentId, Ed25519PublicKey, Interface, Message, Signer, Timestamp};

use crate::delegated::DelegatedGrant;
use crate::error::{PermsError, Result};
use crate::request::RequestMessage;
use crate::scope::{
    check_received_scope, expect_permissions_descriptor, prepare_scope, Conditions,
    PermissionScope, PermissionsMethod,
};

/// Descriptor of a `PermissionsGrant` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantDescriptor {
    pub interface: Interface,
    pub method: PermissionsMethod,
    pub message_timestamp: Timestamp,

    /// The grantor.
    pub granted_by: String,

    /// The grantee.
    pub granted_to: String,

    /// The owner of the data store the grant applies to.
    pub granted_for: String,

    pub date_expires: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub scope: PermissionScope,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,

    /// Content identifier of the request this grant answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions_request_id: Option<ContentId>,

    /// When `Some(true)`, the grantee may act with the grantor's authority
    /// within `scope`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated: Option<bool>,
}

/// A signed permission grant message.
pub type GrantMessage = Message<GrantDescriptor>;

/// Inputs to [`PermissionsGrant::create`].
#[derive(Debug, Clone)]
pub struct GrantOptions {
    /// Defaults to now.
    pub message_timestamp: Option<Timestamp>,

    /// Must be in the future; not re-checked here.
    pub date_expires: Timestamp,

    pub description: Option<String>,
    pub granted_by: String,
    pub granted_to: String,
    pub granted_for: String,
    pub scope: PermissionScope,
    pub conditions: Option<Conditions>,
    pub delegated: Option<bool>,
}

/// Per-field overrides for [`PermissionsGrant::create_from_permissions_request`].
///
/// Every field left as `None` is copied from the request.
#[derive(Debug, Clone, Default)]
pub struct GrantOverrides {
    pub date_expires: Option<Timestamp>,
    pub description: Option<String>,
    pub granted_by: Option<String>,
    pub granted_to: Option<String>,
    pub granted_for: Option<String>,
    pub scope: Option<PermissionScope>,
    pub conditions: Option<Conditions>,

    /// Requests carry no delegation flag, so this is the only way to derive a
    /// delegated grant.
    pub delegated: Option<bool>,
}

/// A validated, signed permission grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsGrant {
    message: GrantMessage,
}

impl PermissionsGrant {
    /// Build and sign a new grant.
    pub async fn create<S: Signer + ?Sized>(options: GrantOptions, signer: &S) -> Result<Self> {
        Self::build(options, None, signer).await
    }

    /// Build and sign a grant answering `request`.
    ///
    /// The grant's `permissionsRequestId` is the content identifier of the
    /// request message, so a verifier can later tie the two together.
    pub async fn create_from_permissions_request<S: Signer + ?Sized>(
        request: &RequestMessage,
        signer: &S,
        overrides: GrantOverrides,
    ) -> Result<Self> {
        let request_id = request.content_id()?;
        let requested = &request.descriptor;

        let options = GrantOptions {
            message_timestamp: None,
            date_expires: overrides.date_expires.unwrap_or(requested.date_expires),
            description: overrides
                .description
                .or_else(|| requested.description.clone()),
            granted_by: overrides
                .granted_by
                .unwrap_or_else(|| requested.granted_by.clone()),
            granted_to: overrides
                .granted_to
                .unwrap_or_else(|| requested.granted_to.clone()),
            granted_for: overrides
                .granted_for
                .unwrap_or_else(|| requested.granted_for.clone()),
            scope: overrides.scope.unwrap_or_else(|| requested.scope.clone()),
            conditions: overrides
                .conditions
                .or_else(|| requested.conditions.clone()),
            delegated: overrides.delegated,
        };

        Self::build(options, Some(request_id), signer).await
    }

    async fn build<S: Signer + ?Sized>(
        options: GrantOptions,
        permissions_request_id: Option<ContentId>,
        signer: &S,
    ) -> Result<Self> {
        let scope = prepare_scope(options.scope)?;

        let descriptor = GrantDescriptor {
            interface: Interface::Permissions,
            method: PermissionsMethod::Grant,
            message_timestamp: options.message_timestamp.unwrap_or_else(Timestamp::now),
            granted_by: options.granted_by,
            granted_to: options.granted_to,
            granted_for: options.granted_for,
            date_expires: options.date_expires,
            description: options.description,
            scope,
            conditions: options.conditions,
            permissions_request_id,
            delegated: options.delegated,
        };

        let message = Message::sign(descriptor, signer).await?;
        tracing::debug!(
            author = message.author(),
            granted_to = %message.descriptor.granted_to,
            request_id = ?message.descriptor.permissions_request_id,
            "signed permissions grant"
        );

        Ok(Self { message })
    }

    /// Accept a grant received from elsewhere.
    ///
    /// Checks the descriptor kind, that scope URIs are canonical, and the scope
    /// rules. Signature verification needs the author's key; see
    /// [`PermissionsGrant::verify`].
    pub fn parse(message: GrantMessage) -> Result<Self> {
        let descriptor = &message.descriptor;
        expect_permissions_descriptor(
            descriptor.interface,
            descriptor.method,
            PermissionsMethod::Grant,
        )?;
        check_received_scope(&descriptor.scope)?;

        Ok(Self { message })
    }

    /// Verify the grant was signed by `public_key`. Returns the author DID.
    pub fn verify(&self, public_key: &Ed25519PublicKey) -> Result<&str> {
        Ok(self.message.verify(public_key)?)
    }

    /// Fail unless the grant was signed by its `grantedBy` principal.
    pub fn verify_grantor(&self) -> Result<()> {
        let author = self.author();
        let granted_by = &self.message.descriptor.granted_by;
        if author != granted_by {
            return Err(PermsError::GrantedByMismatch {
                author: author.to_string(),
                granted_by: granted_by.clone(),
            });
        }
        Ok(())
    }

    /// Whether the grant has expired as of `at`.
    pub fn is_expired_at(&self, at: &Timestamp) -> bool {
        self.message.descriptor.date_expires <= *at
    }

    /// View this grant as a delegated grant.
    ///
    /// Fails with [`PermsError::NotADelegatedGrant`] unless `delegated` is
    /// exactly `true`.
    pub fn as_delegated_grant(&self) -> Result<DelegatedGrant<'_>> {
        DelegatedGrant::try_from(&self.message)
    }

    /// The content identifier of the grant message.
    pub fn id(&self) -> Result<ContentId> {
        Ok(self.message.content_id()?)
    }

    pub fn message(&self) -> &GrantMessage {
        &self.message
    }

    pub fn into_message(self) -> GrantMessage {
        self.message
    }

    pub fn descriptor(&self) -> &GrantDescriptor {
        &self.message.descriptor
    }

    /// The DID that signed the grant.
    pub fn author(&self) -> &str {
        self.message.author()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{PermissionsRequest, RequestOptions};
    use crate::scope::{Publication, RecordsMethod, RecordsScope};
    use chrono::Duration;
    use dwn_node_core::{CoreError, Ed25519Signer, Keypair, SignError};

    fn alice() -> Ed25519Signer {
        Ed25519Signer::new("did:example:alice#key1", Keypair::from_seed(&[1; 32]))
    }

    fn bob() -> Ed25519Signer {
        Ed25519Signer::new("did:example:bob#key1", Keypair::from_seed(&[2; 32]))
    }

    fn options(scope: PermissionScope) -> GrantOptions {
        GrantOptions {
            message_timestamp: None,
            date_expires: Timestamp::offset_from_now(Duration::days(1)),
            description: None,
            granted_by: "did:example:alice".into(),
            granted_to: "did:example:bob".into(),
            granted_for: "did:example:alice".into(),
            scope,
            conditions: None,
            delegated: None,
        }
    }

    async fn request() -> PermissionsRequest {
        PermissionsRequest::create(
            RequestOptions {
                message_timestamp: None,
                date_expires: Timestamp::offset_from_now(Duration::days(7)),
                description: Some("drafts".into()),
                granted_by: "did:example:alice".into(),
                granted_to: "did:example:bob".into(),
                granted_for: "did:example:alice".into(),
                scope: RecordsScope::new(RecordsMethod::Write)
                    .with_protocol("example.com/chat")
                    .into(),
                conditions: Some(Conditions::publication_required()),
            },
            &bob(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_plain_records_write() {
        let scope = PermissionScope::records(RecordsMethod::Write);
        let grant = PermissionsGrant::create(options(scope.clone()), &alice())
            .await
            .unwrap();

        let descriptor = grant.descriptor();
        assert_eq!(descriptor.scope, scope);
        assert!(descriptor.conditions.is_none());
        assert!(descriptor.permissions_request_id.is_none());
        assert!(descriptor.delegated.is_none());
        assert_eq!(descriptor.interface, Interface::Permissions);
        assert_eq!(descriptor.method, PermissionsMethod::Grant);
        assert_eq!(grant.author(), "did:example:alice");
    }

    #[tokio::test]
    async fn test_create_normalizes_uris() {
        let scope = RecordsScope::new(RecordsMethod::Read).with_schema("example.com/note/");
        let grant = PermissionsGrant::create(options(scope.into()), &alice())
            .await
            .unwrap();

        assert_eq!(grant.descriptor().scope.schema(), Some("http://example.com/note"));
    }

    #[tokio::test]
    async fn test_create_rejects_schema_with_protocol() {
        let scope = RecordsScope::new(RecordsMethod::Write)
            .with_schema("s")
            .with_protocol("p");
        let result = PermissionsGrant::create(options(scope.into()), &alice()).await;
        assert!(matches!(result, Err(PermsError::ScopeSchemaProhibitedFields)));
    }

    #[tokio::test]
    async fn test_create_rejects_context_id_with_protocol_path() {
        let scope = RecordsScope::new(RecordsMethod::Write)
            .with_protocol("http://example.com")
            .with_context_id("ctx")
            .with_protocol_path("post");
        let result = PermissionsGrant::create(options(scope.into()), &alice()).await;
        assert!(matches!(result, Err(PermsError::ScopeContextIdAndProtocolPath)));
    }

    #[tokio::test]
    async fn test_derive_without_overrides_copies_request() {
        let request = request().await;
        let grant = PermissionsGrant::create_from_permissions_request(
            request.message(),
            &alice(),
            GrantOverrides::default(),
        )
        .await
        .unwrap();

        let requested = request.descriptor();
        let granted = grant.descriptor();
        assert_eq!(granted.description, requested.description);
        assert_eq!(granted.granted_by, requested.granted_by);
        assert_eq!(granted.granted_to, requested.granted_to);
        assert_eq!(granted.granted_for, requested.granted_for);
        assert_eq!(granted.scope, requested.scope);
        assert_eq!(granted.conditions, requested.conditions);
        assert_eq!(granted.date_expires, requested.date_expires);
        assert_eq!(granted.permissions_request_id, Some(request.id().unwrap()));
    }

    #[tokio::test]
    async fn test_derive_with_overrides() {
        let request = request().await;
        let date_expires = Timestamp::offset_from_now(Duration::hours(1));
        let scope: PermissionScope = RecordsScope::new(RecordsMethod::Read)
            .with_schema("http://example.com/photo")
            .into();

        let grant = PermissionsGrant::create_from_permissions_request(
            request.message(),
            &alice(),
            GrantOverrides {
                date_expires: Some(date_expires),
                description: Some("read photos".into()),
                granted_by: Some("did:example:carol".into()),
                granted_to: Some("did:example:dave".into()),
                granted_for: Some("did:example:carol".into()),
                scope: Some(scope.clone()),
                conditions: Some(Conditions {
                    publication: Some(Publication::Prohibited),
                }),
                delegated: None,
            },
        )
        .await
        .unwrap();

        let granted = grant.descriptor();
        assert_eq!(granted.date_expires, date_expires);
        assert_eq!(granted.description.as_deref(), Some("read photos"));
        assert_eq!(granted.granted_by, "did:example:carol");
        assert_eq!(granted.granted_to, "did:example:dave");
        assert_eq!(granted.granted_for, "did:example:carol");
        assert_eq!(granted.scope, scope);
        assert_eq!(granted.conditions, Some(Conditions::publication_prohibited()));
        assert_eq!(granted.permissions_request_id, Some(request.id().unwrap()));
    }

    #[tokio::test]
    async fn test_derive_validates_overridden_scope() {
        let request = request().await;
        let result = PermissionsGrant::create_from_permissions_request(
            request.message(),
            &alice(),
            GrantOverrides {
                scope: Some(
                    RecordsScope::new(RecordsMethod::Write)
                        .with_schema("s")
                        .with_context_id("c")
                        .into(),
                ),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(PermsError::ScopeSchemaProhibitedFields)));
    }

    #[tokio::test]
    async fn test_sign_then_verify() {
        let signer = alice();
        let grant = PermissionsGrant::create(
            options(PermissionScope::records(RecordsMethod::Query)),
            &signer,
        )
        .await
        .unwrap();

        assert_eq!(grant.verify(&signer.public_key()).unwrap(), "did:example:alice");
        assert!(matches!(
            grant.verify(&bob().public_key()),
            Err(PermsError::Core(CoreError::InvalidSignature))
        ));
    }

    #[tokio::test]
    async fn test_verify_grantor() {
        let grant = PermissionsGrant::create(
            options(PermissionScope::records(RecordsMethod::Read)),
            &alice(),
        )
        .await
        .unwrap();
        assert!(grant.verify_grantor().is_ok());

        let forged = PermissionsGrant::create(
            options(PermissionScope::records(RecordsMethod::Read)),
            &bob(),
        )
        .await
        .unwrap();
        assert!(matches!(
            forged.verify_grantor(),
            Err(PermsError::GrantedByMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_parse_requires_canonical_scope() {
        let grant = PermissionsGrant::create(
            options(
                RecordsScope::new(RecordsMethod::Write)
                    .with_protocol("http://example.com")
                    .into(),
            ),
            &alice(),
        )
        .await
        .unwrap();
        assert!(PermissionsGrant::parse(grant.message().clone()).is_ok());

        let mut message = grant.into_message();
        message.descriptor.scope = RecordsScope::new(RecordsMethod::Write)
            .with_protocol("example.com/")
            .into();
        assert!(matches!(
            PermissionsGrant::parse(message),
            Err(PermsError::UrlProtocolNotNormalized(_))
        ));
    }

    #[tokio::test]
    async fn test_created_grant_parses_for_any_scheme() {
        for protocol in ["file:foo/", "example.com/chat/", "did:example:chat"] {
            let grant = PermissionsGrant::create(
                options(RecordsScope::new(RecordsMethod::Write).with_protocol(protocol).into()),
                &alice(),
            )
            .await
            .unwrap();
            assert!(
                PermissionsGrant::parse(grant.message().clone()).is_ok(),
                "{protocol}"
            );
        }

        let grant = PermissionsGrant::create(
            options(RecordsScope::new(RecordsMethod::Read).with_schema("file:note/").into()),
            &alice(),
        )
        .await
        .unwrap();
        assert_eq!(grant.descriptor().scope.schema(), Some("file:///note"));
        assert!(PermissionsGrant::parse(grant.into_message()).is_ok());
    }

    #[tokio::test]
    async fn test_is_expired_at() {
        let grant = PermissionsGrant::create(
            options(PermissionScope::records(RecordsMethod::Read)),
            &alice(),
        )
        .await
        .unwrap();

        assert!(!grant.is_expired_at(&Timestamp::now()));
        assert!(grant.is_expired_at(&Timestamp::offset_from_now(Duration::days(2))));
    }

    #[tokio::test]
    async fn test_wire_field_names() {
        let grant = PermissionsGrant::create(
            GrantOptions {
                delegated: Some(true),
                description: Some("d".into()),
                ..options(PermissionScope::records(RecordsMethod::Write))
            },
            &alice(),
        )
        .await
        .unwrap();

        let json = serde_json::to_value(grant.descriptor()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in [
            "interface",
            "method",
            "messageTimestamp",
            "grantedBy",
            "grantedTo",
            "grantedFor",
            "dateExpires",
            "description",
            "scope",
            "delegated",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert!(!keys.contains(&"conditions"));
        assert!(!keys.contains(&"permissionsRequestId"));
    }

    struct OfflineSigner;

    #[async_trait::async_trait]
    impl Signer for OfflineSigner {
        fn key_id(&self) -> &str {
            "did:example:alice#key1"
        }

        fn algorithm(&self) -> &str {
            "EdDSA"
        }

        async fn sign(&self, _payload: &[u8]) -> std::result::Result<Vec<u8>, SignError> {
            Err(SignError::SigningFailed("remote signer unreachable".into()))
        }
    }

    #[tokio::test]
    async fn test_signer_failure_propagates() {
        let result = PermissionsGrant::create(
            options(PermissionScope::records(RecordsMethod::Write)),
            &OfflineSigner,
        )
        .await;
        assert!(matches!(
            result,
            Err(PermsError::Core(CoreError::Signer(SignError::SigningFailed(_))))
        ));
    }
}
