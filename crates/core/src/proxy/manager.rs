//! Façade entry point

use std::sync::Arc;

use dashmap::DashMap;
use perx_domain::constants::DEFAULT_LANG;
use perx_domain::{BearerTokenResponse, Identification, Result, Token};
use tracing::instrument;

use super::{PosProxy, UserProxy};
use crate::client::PerxClient;
use crate::token::{InMemoryTokenPool, TokenBroker, TokenPool};

/// Hands out user and POS façades sharing one token pool.
///
/// One [`PerxClient`] is kept per language. Tokens are always issued through
/// the default-language client.
pub struct ProxyManager {
    client: PerxClient,
    clients: DashMap<String, PerxClient>,
    broker: TokenBroker,
}

impl ProxyManager {
    /// Manager with a fresh in-memory token pool.
    pub fn new(client: PerxClient) -> Self {
        Self::with_pool(client, Arc::new(InMemoryTokenPool::new()))
    }

    /// Manager storing tokens in `pool`.
    pub fn with_pool(client: PerxClient, pool: Arc<dyn TokenPool>) -> Self {
        let broker = TokenBroker::new(Arc::new(client.clone()), pool);
        Self { client, clients: DashMap::new(), broker }
    }

    pub fn client(&self) -> &PerxClient {
        &self.client
    }

    pub fn broker(&self) -> &TokenBroker {
        &self.broker
    }

    fn client_for(&self, lang: &str) -> PerxClient {
        if lang == self.client.lang() {
            return self.client.clone();
        }
        self.clients
            .entry(lang.to_string())
            .or_insert_with(|| self.client.with_lang(lang))
            .clone()
    }

    /// Façade acting as `identity`, speaking `lang`.
    pub fn user(&self, identity: Identification, lang: &str) -> UserProxy {
        UserProxy::new(self.client_for(lang), self.broker.clone(), identity)
    }

    /// Application-scoped façade speaking `lang`.
    pub fn pos(&self, lang: &str) -> PosProxy {
        PosProxy::new(self.client_for(lang), self.broker.clone())
    }

    /// Bearer token for a merchant staff account. Not cached.
    ///
    /// # Errors
    /// See [`PerxClient::merchant_bearer_token`].
    #[instrument(skip(self))]
    pub async fn merchant_bearer(
        &self,
        identifier: &str,
        lang: Option<&str>,
    ) -> Result<BearerTokenResponse> {
        self.client_for(lang.unwrap_or(DEFAULT_LANG)).merchant_bearer_token(identifier).await
    }

    /// # Errors
    /// See [`TokenBroker::assure_token`].
    pub async fn assure_token(&self, identity: &Identification) -> Result<Token> {
        self.broker.assure_token(identity).await
    }

    /// # Errors
    /// See [`TokenBroker::assure_application_token`].
    pub async fn assure_application_token(&self) -> Result<Token> {
        self.broker.assure_application_token().await
    }
}

impl std::fmt::Debug for ProxyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyManager")
            .field("lang", &self.client.lang())
            .field("languages", &self.clients.len())
            .finish_non_exhaustive()
    }
}
