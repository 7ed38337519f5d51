//! Permission scopes and conditions.
//!
//! A scope names the interface and method a grant authorizes. Each interface
//! has its own method enum, so an interface/method pair that does not exist
//! cannot be expressed. Only `Records` scopes carry resource qualifiers, and
//! their cross-field rules are enforced by [`validate_scope`].

use serde::{Deserialize, Serialize};

use dwn_node_core::Interface;

use crate::error::{PermsError, Result};
use crate::uri::{
    normalize_protocol_url, normalize_schema_url, validate_protocol_url_normalized,
    validate_schema_url_normalized,
};

/// Methods of the `Records` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordsMethod {
    Read,
    Write,
    Delete,
    Query,
    Subscribe,
}

/// Methods of the `Protocols` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolsMethod {
    Configure,
    Query,
}

/// Methods of the `Messages` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessagesMethod {
    Get,
    Query,
    Subscribe,
}

/// Methods of the `Permissions` interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionsMethod {
    Request,
    Grant,
    Revoke,
}

impl RecordsMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            RecordsMethod::Read => "Read",
            RecordsMethod::Write => "Write",
            RecordsMethod::Delete => "Delete",
            RecordsMethod::Query => "Query",
            RecordsMethod::Subscribe => "Subscribe",
        }
    }
}

impl ProtocolsMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProtocolsMethod::Configure => "Configure",
            ProtocolsMethod::Query => "Query",
        }
    }
}

impl MessagesMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            MessagesMethod::Get => "Get",
            MessagesMethod::Query => "Query",
            MessagesMethod::Subscribe => "Subscribe",
        }
    }
}

impl PermissionsMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            PermissionsMethod::Request => "Request",
            PermissionsMethod::Grant => "Grant",
            PermissionsMethod::Revoke => "Revoke",
        }
    }
}

/// Scope of a permission grant.
///
/// Serialized with an `interface` tag:
/// `{"interface":"Records","method":"Write","protocol":"http://example.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "interface", deny_unknown_fields)]
pub enum PermissionScope {
    /// Access to records, optionally narrowed by schema or protocol tree position.
    Records(RecordsScope),

    /// Access to protocol definitions.
    Protocols { method: ProtocolsMethod },

    /// Access to raw messages.
    Messages { method: MessagesMethod },

    /// Access to the permissions interface itself.
    Permissions { method: PermissionsMethod },
}

/// A records scope and its optional resource qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecordsScope {
    pub method: RecordsMethod,

    /// Free-form content type. Excludes every protocol-tree field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// A specific protocol context instance. Excludes `protocol_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// A position pattern in a protocol's record tree. Excludes `context_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol_path: Option<String>,
}

impl RecordsScope {
    /// An unqualified records scope.
    pub fn new(method: RecordsMethod) -> Self {
        Self {
            method,
            schema: None,
            protocol: None,
            context_id: None,
            protocol_path: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn with_context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    pub fn with_protocol_path(mut self, protocol_path: impl Into<String>) -> Self {
        self.protocol_path = Some(protocol_path.into());
        self
    }
}

impl From<RecordsScope> for PermissionScope {
    fn from(scope: RecordsScope) -> Self {
        PermissionScope::Records(scope)
    }
}

impl PermissionScope {
    /// Shortcut for an unqualified records scope.
    pub fn records(method: RecordsMethod) -> Self {
        PermissionScope::Records(RecordsScope::new(method))
    }

    /// The interface this scope applies to.
    pub const fn interface(&self) -> Interface {
        match self {
            PermissionScope::Records(_) => Interface::Records,
            PermissionScope::Protocols { .. } => Interface::Protocols,
            PermissionScope::Messages { .. } => Interface::Messages,
            PermissionScope::Permissions { .. } => Interface::Permissions,
        }
    }

    /// The wire name of the method this scope applies to.
    pub const fn method_name(&self) -> &'static str {
        match self {
            PermissionScope::Records(scope) => scope.method.as_str(),
            PermissionScope::Protocols { method } => method.as_str(),
            PermissionScope::Messages { method } => method.as_str(),
            PermissionScope::Permissions { method } => method.as_str(),
        }
    }

    /// Check whether this scope names `interface` and `method`.
    ///
    /// Resource qualifiers are not considered.
    pub fn covers(&self, interface: Interface, method: &str) -> bool {
        self.interface() == interface && self.method_name() == method
    }

    /// The records qualifiers, if this is a records scope.
    pub fn as_records(&self) -> Option<&RecordsScope> {
        match self {
            PermissionScope::Records(scope) => Some(scope),
            _ => None,
        }
    }

    /// The protocol this scope is narrowed to, if any.
    pub fn protocol(&self) -> Option<&str> {
        self.as_records().and_then(|s| s.protocol.as_deref())
    }

    /// The schema this scope is narrowed to, if any.
    pub fn schema(&self) -> Option<&str> {
        self.as_records().and_then(|s| s.schema.as_deref())
    }

    /// Return this scope with `schema` and `protocol` in canonical URI form.
    pub fn normalized(self) -> Self {
        match self {
            PermissionScope::Records(mut scope) => {
                scope.schema = scope.schema.map(|s| normalize_schema_url(&s));
                scope.protocol = scope.protocol.map(|p| normalize_protocol_url(&p));
                PermissionScope::Records(scope)
            }
            other => other,
        }
    }
}

/// Check the cross-field rules of a scope.
///
/// Rules, in order:
/// 1. `schema` excludes `protocol`, `contextId` and `protocolPath`.
/// 2. `contextId` and `protocolPath` exclude each other.
pub fn validate_scope(scope: &PermissionScope) -> Result<()> {
    let PermissionScope::Records(records) = scope else {
        return Ok(());
    };

    if records.schema.is_some()
        && (records.protocol.is_some()
            || records.context_id.is_some()
            || records.protocol_path.is_some())
    {
        return Err(PermsError::ScopeSchemaProhibitedFields);
    }

    if records.context_id.is_some() && records.protocol_path.is_some() {
        return Err(PermsError::ScopeContextIdAndProtocolPath);
    }

    Ok(())
}

/// Normalize then validate a scope supplied by a caller building a message.
pub(crate) fn prepare_scope(scope: PermissionScope) -> Result<PermissionScope> {
    let scope = scope.normalized();
    if let Err(e) = validate_scope(&scope) {
        tracing::warn!(?scope, "rejected permission scope: {}", e);
        return Err(e);
    }
    Ok(scope)
}

/// Validate a scope taken from a received message. URIs must already be canonical.
pub(crate) fn check_received_scope(scope: &PermissionScope) -> Result<()> {
    if let Some(protocol) = scope.protocol() {
        validate_protocol_url_normalized(protocol)?;
    }
    if let Some(schema) = scope.schema() {
        validate_schema_url_normalized(schema)?;
    }
    validate_scope(scope)
}

/// Fail unless a descriptor is tagged `Permissions` / `expected`.
pub(crate) fn expect_permissions_descriptor(
    interface: Interface,
    method: PermissionsMethod,
    expected: PermissionsMethod,
) -> Result<()> {
    if interface != Interface::Permissions || method != expected {
        return Err(PermsError::UnexpectedDescriptor {
            expected: format!("{}{}", Interface::Permissions, expected.as_str()),
            actual: format!("{}{}", interface, method.as_str()),
        });
    }
    Ok(())
}

/// Conditions on how a grantee may exercise a grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    /// Whether records written under the grant must or must not be published.
    /// Unset means either is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<Publication>,
}

impl Conditions {
    /// Conditions requiring publication.
    pub fn publication_required() -> Self {
        Self {
            publication: Some(Publication::Required),
        }
    }

    /// Conditions prohibiting publication.
    pub fn publication_prohibited() -> Self {
        Self {
            publication: Some(Publication::Prohibited),
        }
    }
}

/// Publication requirement for records written under a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Publication {
    Required,
    Prohibited,
}
