//! Issuer configuration.

use serde::Deserialize;

use crate::error::{NodeError, Result};

/// Default grant lifetime: 30 days.
pub const DEFAULT_GRANT_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Configuration for a [`GrantIssuer`](crate::GrantIssuer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IssuerConfig {
    /// Lifetime of grants issued without an explicit `dateExpires`.
    pub default_grant_ttl_secs: i64,
    /// Whether this issuer may sign delegated grants.
    pub allow_delegation: bool,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            default_grant_ttl_secs: DEFAULT_GRANT_TTL_SECS,
            allow_delegation: true,
        }
    }
}

impl IssuerConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| NodeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_grant_ttl_secs <= 0 {
            return Err(NodeError::InvalidConfig(format!(
                "default_grant_ttl_secs must be positive, got {}",
                self.default_grant_ttl_secs
            )));
        }
        Ok(())
    }

    pub(crate) fn default_grant_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.default_grant_ttl_secs)
    }
}
