//! Shared descriptor vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The DWN interface a message (or a permission scope) addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interface {
    Records,
    Protocols,
    Messages,
    Permissions,
}

impl Interface {
    /// The wire name of the interface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Interface::Records => "Records",
            Interface::Protocols => "Protocols",
            Interface::Messages => "Messages",
            Interface::Permissions => "Permissions",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
