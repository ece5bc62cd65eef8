//! Typed provider operations
//!
//! [`PerxClient`] maps each provider endpoint to one async method taking an
//! access token. It holds no tokens itself; the façades in [`crate::proxy`]
//! supply them.

mod auth;
mod catalog;
mod customers;
mod loyalty;
mod pos;
mod rewards;
mod vouchers;

use std::sync::Arc;

use perx_common::validation::{FieldValidator, NumericIdValidator};
use perx_domain::{PerxConfig, PerxError, Result, Token};
use tracing::debug;

use crate::envelope::{parse_and_evaluate, Envelope, Shape};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Provider client bound to one `Accept-Language`.
#[derive(Clone)]
pub struct PerxClient {
    transport: Arc<dyn Transport>,
    config: Arc<PerxConfig>,
    lang: String,
}

impl PerxClient {
    /// Client speaking the configured default language.
    pub fn new(transport: Arc<dyn Transport>, config: PerxConfig) -> Self {
        let lang = config.lang.clone();
        Self { transport, config: Arc::new(config), lang }
    }

    /// Same transport and configuration, different language.
    #[must_use]
    pub fn with_lang(&self, lang: impl Into<String>) -> Self {
        Self { transport: Arc::clone(&self.transport), config: Arc::clone(&self.config), lang: lang.into() }
    }

    pub fn config(&self) -> &PerxConfig {
        &self.config
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = request.lang(self.lang.clone());
        debug!(method = %request.method, path = %request.path, "dispatching provider request");
        self.transport.send(request).await
    }

    async fn call<S: Shape>(&self, request: ApiRequest) -> Result<Envelope<S::Data, S::Meta>> {
        let response = self.send(request).await?;
        parse_and_evaluate::<S>(response.body, response.status)
    }
}

impl std::fmt::Debug for PerxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerxClient").field("lang", &self.lang).finish_non_exhaustive()
    }
}

fn authorized(request: ApiRequest, token: &Token) -> ApiRequest {
    request.bearer(token.access_token.clone())
}

/// Check that a caller-supplied id is numeric before it goes into a path.
fn path_id<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    NumericIdValidator::new()
        .validate(value)
        .map(|()| value)
        .map_err(|_| PerxError::bad_input(format!("Invalid {name}: {value}, expected {name} as integer")))
}

fn first_entry<T>(entries: Vec<T>, what: &str) -> Result<T> {
    entries
        .into_iter()
        .next()
        .ok_or_else(|| PerxError::malformed(format!("response carries no {what}")))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by client and façade tests.

    use std::collections::VecDeque;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use perx_domain::PerxConfig;
    use serde_json::Value;

    use super::*;

    /// Replays queued responses and records every request.
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        pub fn reply(&self, status: u16, body: Value) -> &Self {
            self.responses.lock().push_back(ApiResponse::new(status, Some(body)));
            self
        }

        pub fn reply_empty(&self, status: u16) -> &Self {
            self.responses.lock().push_back(ApiResponse::new(status, None));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().push(request);
            self.responses
                .lock()
                .pop_front()
                .ok_or_else(|| PerxError::Network("no scripted response left".into()))
        }
    }

    pub fn config() -> PerxConfig {
        PerxConfig::new("https://perx.example", "client-id", "client-secret")
    }

    pub fn client(transport: &Arc<ScriptedTransport>) -> PerxClient {
        PerxClient::new(transport.clone(), config())
    }

    pub fn user_token() -> Token {
        Token::new("user-token", perx_domain::TokenKind::User, 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_id_accepts_digits_only() {
        assert_eq!(path_id("rewardId", "123").unwrap(), "123");
        let err = path_id("rewardId", "12a").unwrap_err();
        assert_eq!(
            err,
            PerxError::bad_input("Invalid rewardId: 12a, expected rewardId as integer")
        );
        assert!(path_id("voucherId", "").is_err());
    }

    #[test]
    fn with_lang_keeps_configuration() {
        let transport = Arc::new(testing::ScriptedTransport::default());
        let client = testing::client(&transport);
        let thai = client.with_lang("th");

        assert_eq!(client.lang(), "en");
        assert_eq!(thai.lang(), "th");
        assert_eq!(thai.config().client_id, "client-id");
    }
}
