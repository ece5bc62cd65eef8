//! Provider user accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account as seen by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    /// Provider account id.
    pub id: u64,
    /// Tenant-assigned identifier, used to issue user tokens.
    pub identifier: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Birthday as `YYYY-MM-DD`.
    pub birthday: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// `active` or `inactive`.
    pub state: Option<String>,
    /// When the account was created.
    pub joined_at: Option<DateTime<Utc>>,
    /// When the password expires.
    pub password_expires_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Identifier usable as a token subject, if the account has a non-empty one.
    pub fn token_subject(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|identifier| !identifier.is_empty())
    }
}
