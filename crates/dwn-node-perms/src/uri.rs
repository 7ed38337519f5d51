//! Canonical URI normalization for `protocol` and `schema` fields.
//!
//! Normalization rules:
//! - Inputs that only parse relative to a base are treated as `http://` URLs
//! - The result is a WHATWG URL serialization (lowercased scheme and host)
//! - Query and fragment are dropped
//! - Trailing `/` characters are stripped
//!
//! Inputs that cannot be parsed are returned unchanged. Normalizing an already
//! normalized value returns it unchanged.

use url::{ParseError, Url};

use crate::error::{PermsError, Result};

/// Normalize a protocol URI.
pub fn normalize_protocol_url(url: &str) -> String {
    normalize_url(url)
}

/// Normalize a schema URI.
pub fn normalize_schema_url(url: &str) -> String {
    normalize_url(url)
}

/// Fail unless `url` is already a normalized protocol URI.
pub fn validate_protocol_url_normalized(url: &str) -> Result<()> {
    if normalize_protocol_url(url) != url {
        return Err(PermsError::UrlProtocolNotNormalized(url.to_string()));
    }
    Ok(())
}

/// Fail unless `url` is already a normalized schema URI.
pub fn validate_schema_url_normalized(url: &str) -> Result<()> {
    if normalize_schema_url(url) != url {
        return Err(PermsError::UrlSchemaNotNormalized(url.to_string()));
    }
    Ok(())
}

fn normalize_url(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{url}")),
        other => other,
    };
    let Ok(mut parsed) = parsed else {
        return url.to_string();
    };
    parsed.set_query(None);
    parsed.set_fragment(None);

    parsed.as_str().trim_end_matches('/').to_string()
}
