//! Proptest generators for property-based testing.

use proptest::prelude::*;

use dwn_node_core::Keypair;
use dwn_node_perms::{
    MessagesMethod, PermissionScope, PermissionsMethod, ProtocolsMethod, RecordsMethod,
    RecordsScope,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a DID in the `did:example` method.
pub fn did() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{2,15}".prop_map(|name| format!("did:example:{name}"))
}

/// Generate a records method.
pub fn records_method() -> impl Strategy<Value = RecordsMethod> {
    prop_oneof![
        Just(RecordsMethod::Read),
        Just(RecordsMethod::Write),
        Just(RecordsMethod::Delete),
        Just(RecordsMethod::Query),
        Just(RecordsMethod::Subscribe),
    ]
}

/// Generate a URL-like input, with or without a scheme, that the normalizer
/// accepts.
pub fn url_input() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("http://"), Just("https://"), Just("HTTPS://")],
        "[a-zA-Z][a-zA-Z0-9]{0,11}\\.(com|org|xyz)",
        prop::collection::vec("[a-z0-9]{1,8}", 0..=3),
        prop_oneof![Just(""), Just("/"), Just("//"), Just("?v=1"), Just("#frag")],
    )
        .prop_map(|(scheme, host, segments, suffix)| {
            let mut url = format!("{scheme}{host}");
            for segment in segments {
                url.push('/');
                url.push_str(&segment);
            }
            url.push_str(suffix);
            url
        })
}

/// Generate a records scope with any combination of qualifiers, valid or not.
pub fn records_scope() -> impl Strategy<Value = RecordsScope> {
    (
        records_method(),
        prop::option::of(url_input()),
        prop::option::of(url_input()),
        prop::option::of("[a-z0-9]{8,16}"),
        prop::option::of("[a-z]{1,8}(/[a-z]{1,8}){0,2}"),
    )
        .prop_map(|(method, schema, protocol, context_id, protocol_path)| RecordsScope {
            method,
            schema,
            protocol,
            context_id,
            protocol_path,
        })
}

/// Generate any permission scope.
pub fn scope() -> impl Strategy<Value = PermissionScope> {
    prop_oneof![
        4 => records_scope().prop_map(PermissionScope::Records),
        1 => prop_oneof![Just(ProtocolsMethod::Configure), Just(ProtocolsMethod::Query)]
            .prop_map(|method| PermissionScope::Protocols { method }),
        1 => prop_oneof![
            Just(MessagesMethod::Get),
            Just(MessagesMethod::Query),
            Just(MessagesMethod::Subscribe),
        ]
        .prop_map(|method| PermissionScope::Messages { method }),
        1 => prop_oneof![
            Just(PermissionsMethod::Request),
            Just(PermissionsMethod::Grant),
            Just(PermissionsMethod::Revoke),
        ]
        .prop_map(|method| PermissionScope::Permissions { method }),
    ]
}

/// Generate a scope that passes validation.
pub fn valid_scope() -> impl Strategy<Value = PermissionScope> {
    scope().prop_filter("scope must pass validation", |scope| {
        dwn_node_perms::validate_scope(scope).is_ok()
    })
}
