//! Token endpoints

use async_trait::async_trait;
use perx_domain::constants::{CLIENT_CREDENTIALS_GRANT, MERCHANT_USER_ACCOUNT_SCOPE};
use perx_domain::{
    BearerTokenResponse, Customer, PerxError, Result, Token, TokenKind, TokenResponse,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, warn};

use super::PerxClient;
use crate::envelope::Root;
use crate::token::TokenIssuer;
use crate::transport::{ApiRequest, ApiResponse};

const TOKEN_PATH: &str = "/v4/oauth/token";

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<u64>,
}

impl PerxClient {
    fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            grant_type: CLIENT_CREDENTIALS_GRANT,
            identifier: None,
            scope: None,
            expires_in: None,
        }
    }

    async fn request_token(&self, body: &TokenRequest<'_>, kind: TokenKind) -> Result<Token> {
        let response = self.send(ApiRequest::post(TOKEN_PATH).json(body)?).await?;
        if response.status == 401 {
            warn!(kind = ?kind, "token endpoint rejected client credentials");
            return Err(PerxError::Unauthorized);
        }
        let envelope =
            crate::envelope::parse_and_evaluate::<Root<TokenResponse>>(response.body, response.status)?;
        Ok(envelope.data.into_token(kind))
    }

    /// Issue a bearer token for a merchant staff account.
    ///
    /// Unlike other endpoints, only a `message` on an error status is treated
    /// as a rejection; `code` and `message` on success are passed through.
    ///
    /// # Errors
    /// `Unauthorized` on 401, `ProviderRejected` when an error status carries
    /// a message, `TransportFailure` when no body came back.
    #[instrument(skip(self))]
    pub async fn merchant_bearer_token(&self, identifier: &str) -> Result<BearerTokenResponse> {
        let body = TokenRequest {
            identifier: Some(identifier),
            scope: Some(MERCHANT_USER_ACCOUNT_SCOPE.to_string()),
            ..self.token_request()
        };
        let response = self.send(ApiRequest::post(TOKEN_PATH).json(&body)?).await?;
        evaluate_bearer_response(response)
    }
}

fn evaluate_bearer_response(response: ApiResponse) -> Result<BearerTokenResponse> {
    if response.status == 401 {
        return Err(PerxError::Unauthorized);
    }
    let body = match response.body {
        None | Some(Value::Null) => {
            return Err(PerxError::TransportFailure { status: response.status })
        }
        Some(body) => body,
    };
    let parsed: BearerTokenResponse = serde_json::from_value(body).map_err(|err| {
        PerxError::malformed(format!("Failed to deserialize bearer token response: {err}"))
    })?;
    if response.status >= 400 {
        if let Some(message) = parsed.message.as_deref().filter(|message| !message.is_empty()) {
            let code = match &parsed.code {
                Some(Value::String(code)) => code.clone(),
                Some(Value::Null) | None => "no-error-code".to_string(),
                Some(other) => other.to_string(),
            };
            return Err(PerxError::rejected(code, message));
        }
    }
    Ok(parsed)
}

#[async_trait]
impl TokenIssuer for PerxClient {
    #[instrument(skip(self))]
    async fn issue_user_token(&self, identifier: &str) -> Result<Token> {
        let body = TokenRequest {
            scope: Some(format!("user_account(identifier:{identifier})")),
            expires_in: Some(self.config.token_duration_seconds),
            ..self.token_request()
        };
        self.request_token(&body, TokenKind::User).await
    }

    #[instrument(skip(self))]
    async fn issue_application_token(&self) -> Result<Token> {
        let body = self.token_request();
        self.request_token(&body, TokenKind::Application).await
    }

    async fn lookup_customer(&self, application_token: &Token, id: u64) -> Result<Customer> {
        self.get_customer_detail(application_token, id).await
    }
}
