//! Permission requests.
//!
//! A request asks a principal to issue a grant. It has the shape of a grant
//! descriptor without `permissionsRequestId` and `delegated`, and is the input to
//! [`PermissionsGrant::create_from_permissions_request`](crate::PermissionsGrant::create_from_permissions_request).

use serde::{Deserialize, Serialize};

use dwn_node_core::{ContentId, Ed25519PublicKey, Interface, Message, Signer, Timestamp};

use crate::error::Result;
use crate::scope::{
    check_received_scope, expect_permissions_descriptor, prepare_scope, Conditions,
    PermissionScope, PermissionsMethod,
};

/// Descriptor of a `PermissionsRequest` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub interface: Interface,
    pub method: PermissionsMethod,
    pub message_timestamp: Timestamp,
    pub date_expires: Timestamp,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub granted_by: String,
    pub granted_to: String,
    pub granted_for: String,
    pub scope: PermissionScope,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
}

/// A signed permission request message.
pub type RequestMessage = Message<RequestDescriptor>;

/// Inputs to [`PermissionsRequest::create`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Defaults to now.
    pub message_timestamp: Option<Timestamp>,
    pub date_expires: Timestamp,
    pub description: Option<String>,
    pub granted_by: String,
    pub granted_to: String,
    pub granted_for: String,
    pub scope: PermissionScope,
    pub conditions: Option<Conditions>,
}

/// A validated, signed permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsRequest {
    message: RequestMessage,
}

impl PermissionsRequest {
    /// Build and sign a new request.
    pub async fn create<S: Signer + ?Sized>(options: RequestOptions, signer: &S) -> Result<Self> {
        let scope = prepare_scope(options.scope)?;

        let descriptor = RequestDescriptor {
            interface: Interface::Permissions,
            method: PermissionsMethod::Request,
            message_timestamp: options.message_timestamp.unwrap_or_else(Timestamp::now),
            date_expires: options.date_expires,
            description: options.description,
            granted_by: options.granted_by,
            granted_to: options.granted_to,
            granted_for: options.granted_for,
            scope,
            conditions: options.conditions,
        };

        let message = Message::sign(descriptor, signer).await?;
        tracing::debug!(author = message.author(), "signed permissions request");

        Ok(Self { message })
    }

    /// Accept a request received from elsewhere.
    ///
    /// Checks the descriptor kind and scope rules. Signature verification needs
    /// the author's key; see [`PermissionsRequest::verify`].
    pub fn parse(message: RequestMessage) -> Result<Self> {
        let descriptor = &message.descriptor;
        expect_permissions_descriptor(
            descriptor.interface,
            descriptor.method,
            PermissionsMethod::Request,
        )?;
        check_received_scope(&descriptor.scope)?;

        Ok(Self { message })
    }

    /// Verify the request was signed by `public_key`. Returns the author DID.
    pub fn verify(&self, public_key: &Ed25519PublicKey) -> Result<&str> {
        Ok(self.message.verify(public_key)?)
    }

    /// The content identifier of the request message.
    pub fn id(&self) -> Result<ContentId> {
        Ok(self.message.content_id()?)
    }

    pub fn message(&self) -> &RequestMessage {
        &self.message
    }

    pub fn into_message(self) -> RequestMessage {
        self.message
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.message.descriptor
    }

    /// The DID that signed the request.
    pub fn author(&self) -> &str {
        self.message.author()
    }
}
