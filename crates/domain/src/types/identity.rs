//! Identity references used to obtain user-scoped tokens

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied reference to a provider user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Identification {
    /// Provider-assigned numeric account id.
    Id {
        /// Account id.
        id: u64,
    },
    /// Tenant-assigned external identifier.
    Identifier {
        /// External identifier string.
        identifier: String,
    },
}

impl Identification {
    /// Reference by numeric account id.
    pub const fn id(id: u64) -> Self {
        Self::Id { id }
    }

    /// Reference by external identifier.
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self::Identifier { identifier: identifier.into() }
    }

    /// Token cache key for this identity.
    ///
    /// Keys always contain a `:` so they never collide with
    /// [`APPLICATION_TOKEN_KEY`](crate::constants::APPLICATION_TOKEN_KEY).
    pub fn cache_key(&self) -> String {
        match self {
            Self::Id { id } => format!("id:{id}"),
            Self::Identifier { identifier } => format!("identifier:{identifier}"),
        }
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}
