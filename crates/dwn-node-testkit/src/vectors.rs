//! Golden vectors for URI normalization and scope validation.
//!
//! Every implementation must normalize these inputs to exactly these outputs
//! and accept or reject these scopes the same way.

use dwn_node_perms::{
    normalize_protocol_url, normalize_schema_url, validate_scope, PermissionScope, PermsError,
    RecordsMethod, RecordsScope,
};

/// A URI normalization vector.
#[derive(Debug, Clone)]
pub struct UrlVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub input: &'static str,
    pub expected: &'static str,
}

/// Expected validation outcome for a scope vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOutcome {
    Valid,
    SchemaProhibitedFields,
    ContextIdAndProtocolPath,
}

/// A scope validation vector.
#[derive(Debug, Clone)]
pub struct ScopeVector {
    pub name: &'static str,
    pub scope: PermissionScope,
    pub expected: ScopeOutcome,
}

/// Get all URI normalization vectors.
pub fn url_vectors() -> Vec<UrlVector> {
    vec![
        UrlVector {
            name: "bare host with trailing slash",
            input: "example.com/",
            expected: "http://example.com",
        },
        UrlVector {
            name: "bare host",
            input: "example.com",
            expected: "http://example.com",
        },
        UrlVector {
            name: "already normalized",
            input: "http://example.com",
            expected: "http://example.com",
        },
        UrlVector {
            name: "https trailing slash",
            input: "https://example.com/",
            expected: "https://example.com",
        },
        UrlVector {
            name: "bare host with path",
            input: "schema.org/Person",
            expected: "http://schema.org/Person",
        },
        UrlVector {
            name: "scheme and host lowercased, path case kept",
            input: "HTTPS://Example.COM/Post",
            expected: "https://example.com/Post",
        },
        UrlVector {
            name: "query and fragment dropped",
            input: "example.com/chat?v=1#section",
            expected: "http://example.com/chat",
        },
        UrlVector {
            name: "repeated trailing slashes",
            input: "https://example.com/notes//",
            expected: "https://example.com/notes",
        },
        UrlVector {
            name: "default port dropped",
            input: "http://example.com:80/x",
            expected: "http://example.com/x",
        },
        UrlVector {
            name: "dot segments resolved",
            input: "https://example.com/a/../b",
            expected: "https://example.com/b",
        },
        UrlVector {
            name: "non-hierarchical scheme kept",
            input: "did:example:123",
            expected: "did:example:123",
        },
        UrlVector {
            name: "file scheme without slashes",
            input: "file:foo/",
            expected: "file:///foo",
        },
        UrlVector {
            name: "file scheme already normalized",
            input: "file:///foo",
            expected: "file:///foo",
        },
        UrlVector {
            name: "unparseable input returned unchanged",
            input: "",
            expected: "",
        },
    ]
}

/// Get all scope validation vectors.
pub fn scope_vectors() -> Vec<ScopeVector> {
    let write = || RecordsScope::new(RecordsMethod::Write);
    vec![
        ScopeVector {
            name: "unqualified records write",
            scope: write().into(),
            expected: ScopeOutcome::Valid,
        },
        ScopeVector {
            name: "schema only",
            scope: write().with_schema("http://example.com/note").into(),
            expected: ScopeOutcome::Valid,
        },
        ScopeVector {
            name: "protocol with context id",
            scope: write()
                .with_protocol("http://example.com")
                .with_context_id("ctx")
                .into(),
            expected: ScopeOutcome::Valid,
        },
        ScopeVector {
            name: "protocol with protocol path",
            scope: write()
                .with_protocol("http://example.com")
                .with_protocol_path("thread/post")
                .into(),
            expected: ScopeOutcome::Valid,
        },
        ScopeVector {
            name: "schema with protocol",
            scope: write().with_schema("s").with_protocol("p").into(),
            expected: ScopeOutcome::SchemaProhibitedFields,
        },
        ScopeVector {
            name: "schema with context id",
            scope: write().with_schema("s").with_context_id("c").into(),
            expected: ScopeOutcome::SchemaProhibitedFields,
        },
        ScopeVector {
            name: "schema with protocol path",
            scope: write().with_schema("s").with_protocol_path("p").into(),
            expected: ScopeOutcome::SchemaProhibitedFields,
        },
        ScopeVector {
            name: "context id with protocol path",
            scope: write().with_context_id("c").with_protocol_path("p").into(),
            expected: ScopeOutcome::ContextIdAndProtocolPath,
        },
        ScopeVector {
            name: "protocol, context id and protocol path",
            scope: write()
                .with_protocol("http://example.com")
                .with_context_id("c")
                .with_protocol_path("p")
                .into(),
            expected: ScopeOutcome::ContextIdAndProtocolPath,
        },
    ]
}

fn outcome_of(scope: &PermissionScope) -> Option<ScopeOutcome> {
    match validate_scope(scope) {
        Ok(()) => Some(ScopeOutcome::Valid),
        Err(PermsError::ScopeSchemaProhibitedFields) => Some(ScopeOutcome::SchemaProhibitedFields),
        Err(PermsError::ScopeContextIdAndProtocolPath) => {
            Some(ScopeOutcome::ContextIdAndProtocolPath)
        }
        Err(_) => None,
    }
}

/// Check every vector. Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let urls = url_vectors().into_iter().map(|v| {
        let protocol = normalize_protocol_url(v.input);
        let schema = normalize_schema_url(v.input);
        let matches = protocol == v.expected && schema == v.expected;
        (v.name.to_string(), matches, protocol)
    });

    let scopes = scope_vectors().into_iter().map(|v| {
        let actual = outcome_of(&v.scope);
        (
            v.name.to_string(),
            actual == Some(v.expected),
            format!("{actual:?}"),
        )
    });

    urls.chain(scopes).collect()
}
