//! Delegated grants.
//!
//! A grant whose `delegated` flag is exactly `true` lets the grantee act with
//! the grantor's authority within the grant's scope. [`DelegatedGrant`] is a
//! read-only view over such a grant message: it borrows the message, never
//! copies or re-signs it, and cannot be constructed for any other grant.
//!
//! Only single-level delegation is modelled.

use dwn_node_core::ContentId;

use crate::error::{PermsError, Result};
use crate::grant::{GrantDescriptor, GrantMessage};
use crate::scope::PermissionScope;

/// A grant message known to carry `delegated: true`.
#[derive(Debug, Clone, Copy)]
pub struct DelegatedGrant<'a> {
    message: &'a GrantMessage,
}

impl<'a> TryFrom<&'a GrantMessage> for DelegatedGrant<'a> {
    type Error = PermsError;

    fn try_from(message: &'a GrantMessage) -> Result<Self> {
        let descriptor = &message.descriptor;
        if descriptor.delegated != Some(true) {
            tracing::warn!(
                granted_by = %descriptor.granted_by,
                granted_to = %descriptor.granted_to,
                delegated = ?descriptor.delegated,
                "refusing delegated view of non-delegated grant"
            );
            return Err(PermsError::NotADelegatedGrant(format!(
                "grant from {} to {} has delegated = {:?}",
                descriptor.granted_by, descriptor.granted_to, descriptor.delegated
            )));
        }
        Ok(Self { message })
    }
}

impl<'a> DelegatedGrant<'a> {
    /// The underlying signed message.
    pub fn message(&self) -> &'a GrantMessage {
        self.message
    }

    pub fn descriptor(&self) -> &'a GrantDescriptor {
        &self.message.descriptor
    }

    /// The principal whose authority is delegated.
    pub fn grantor(&self) -> &'a str {
        &self.message.descriptor.granted_by
    }

    /// The principal that may act with the grantor's authority.
    pub fn delegate(&self) -> &'a str {
        &self.message.descriptor.granted_to
    }

    pub fn scope(&self) -> &'a PermissionScope {
        &self.message.descriptor.scope
    }

    /// The content identifier of the underlying grant message.
    pub fn id(&self) -> Result<ContentId> {
        Ok(self.message.content_id()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grant::{GrantOptions, PermissionsGrant};
    use crate::scope::RecordsMethod;
    use chrono::Duration;
    use dwn_node_core::{Ed25519Signer, Keypair, Timestamp};

    async fn grant(delegated: Option<bool>) -> PermissionsGrant {
        let signer = Ed25519Signer::new("did:example:alice#key1", Keypair::from_seed(&[1; 32]));
        PermissionsGrant::create(
            GrantOptions {
                message_timestamp: None,
                date_expires: Timestamp::offset_from_now(Duration::days(1)),
                description: None,
                granted_by: "did:example:alice".into(),
                granted_to: "did:example:bob".into(),
                granted_for: "did:example:alice".into(),
                scope: PermissionScope::records(RecordsMethod::Write),
                conditions: None,
                delegated,
            },
            &signer,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_delegated_grant_rejected() {
        for flag in [None, Some(false)] {
            let grant = grant(flag).await;
            assert!(matches!(
                grant.as_delegated_grant(),
                Err(PermsError::NotADelegatedGrant(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_delegated_view_borrows_same_message() {
        let grant = grant(Some(true)).await;
        let delegated = grant.as_delegated_grant().unwrap();

        assert!(std::ptr::eq(delegated.message(), grant.message()));
        assert_eq!(delegated.grantor(), "did:example:alice");
        assert_eq!(delegated.delegate(), "did:example:bob");
        assert_eq!(delegated.id().unwrap(), grant.id().unwrap());
    }

    #[tokio::test]
    async fn test_try_from_raw_message() {
        let grant = grant(Some(true)).await;
        let message = grant.into_message();
        let delegated = DelegatedGrant::try_from(&message).unwrap();
        assert_eq!(delegated.scope(), &PermissionScope::records(RecordsMethod::Write));
    }
}
