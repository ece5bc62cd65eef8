//! Port interfaces for token storage and issuance

use std::time::Duration;

use async_trait::async_trait;
use perx_domain::{Customer, Result, Token};

/// Keyed token storage with per-entry expiry.
///
/// Implementations may be remote (e.g. Redis), so both operations are async
/// and fallible.
#[async_trait]
pub trait TokenPool: Send + Sync {
    /// Cached token for `key`, if present and not yet expired.
    async fn get(&self, key: &str) -> Result<Option<Token>>;

    /// Store `token` under `key`, expiring `ttl` from now. Overwrites.
    async fn put(&self, key: &str, token: Token, ttl: Duration) -> Result<()>;
}

/// Provider calls needed to mint tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token scoped to the user with this external identifier.
    async fn issue_user_token(&self, identifier: &str) -> Result<Token>;

    /// Issue a token for the calling application.
    async fn issue_application_token(&self) -> Result<Token>;

    /// Look up a customer by provider id using an application token.
    async fn lookup_customer(&self, application_token: &Token, id: u64) -> Result<Customer>;
}
