//! Token broker - cache-then-issue token acquisition

use std::sync::Arc;

use perx_common::validation::{FieldValidator, NotBlankValidator};
use perx_domain::constants::APPLICATION_TOKEN_KEY;
use perx_domain::{Identification, PerxError, Result, Token};
use tracing::{debug, info, instrument};

use super::ports::{TokenIssuer, TokenPool};

/// Resolves identities to tokens, caching every issued token.
///
/// Concurrent misses for the same key may each issue a token; the last
/// write wins.
#[derive(Clone)]
pub struct TokenBroker {
    issuer: Arc<dyn TokenIssuer>,
    pool: Arc<dyn TokenPool>,
}

impl TokenBroker {
    pub fn new(issuer: Arc<dyn TokenIssuer>, pool: Arc<dyn TokenPool>) -> Self {
        Self { issuer, pool }
    }

    pub fn pool(&self) -> &Arc<dyn TokenPool> {
        &self.pool
    }

    /// Token for the given user, issued on a cache miss.
    ///
    /// A numeric id is first resolved to the customer's identifier using the
    /// application token.
    ///
    /// # Errors
    /// `BadInput("no identifier")` when the identifier is blank or the
    /// customer has no identifier; otherwise whatever the issuer or pool report.
    #[instrument(skip(self), fields(identity = %identity))]
    pub async fn assure_token(&self, identity: &Identification) -> Result<Token> {
        let key = identity.cache_key();
        if let Some(token) = self.pool.get(&key).await? {
            debug!(key = %key, "user token cache hit");
            return Ok(token);
        }

        let identifier = match identity {
            Identification::Identifier { identifier } => identifier.clone(),
            Identification::Id { id } => {
                let application_token = self.assure_application_token().await?;
                let customer = self.issuer.lookup_customer(&application_token, *id).await?;
                customer
                    .token_subject()
                    .map(str::to_string)
                    .ok_or_else(|| PerxError::bad_input("no identifier"))?
            }
        };
        NotBlankValidator::new()
            .trim(true)
            .validate(identifier.as_str())
            .map_err(|_| PerxError::bad_input("no identifier"))?;

        let token = self.issuer.issue_user_token(&identifier).await?;
        self.pool.put(&key, token.clone(), token.ttl()).await?;
        info!(key = %key, ttl_seconds = token.ttl_seconds, "issued user token");
        Ok(token)
    }

    /// Application token, issued on a cache miss.
    ///
    /// # Errors
    /// Whatever the issuer or pool report.
    #[instrument(skip(self))]
    pub async fn assure_application_token(&self) -> Result<Token> {
        if let Some(token) = self.pool.get(APPLICATION_TOKEN_KEY).await? {
            debug!("application token cache hit");
            return Ok(token);
        }

        let token = self.issuer.issue_application_token().await?;
        self.pool.put(APPLICATION_TOKEN_KEY, token.clone(), token.ttl()).await?;
        info!(ttl_seconds = token.ttl_seconds, "issued application token");
        Ok(token)
    }
}

impl std::fmt::Debug for TokenBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBroker").finish_non_exhaustive()
    }
}
