//! Bearer credentials and token-endpoint payloads

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a token authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// The calling backend itself.
    Application,
    /// A single end user.
    User,
}

/// Issued bearer credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Value sent as `Authorization: Bearer <access_token>`.
    pub access_token: String,
    /// Application or user scoped.
    pub kind: TokenKind,
    /// Lifetime declared by the provider at issuance.
    pub ttl_seconds: u64,
}

impl Token {
    /// Create a token.
    pub fn new(access_token: impl Into<String>, kind: TokenKind, ttl_seconds: u64) -> Self {
        Self { access_token: access_token.into(), kind, ttl_seconds }
    }

    /// Lifetime as a cache duration.
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("kind", &self.kind)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Body of a successful `/v4/oauth/token` call.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Issued access token.
    pub access_token: String,
    /// Usually `bearer`.
    #[serde(default)]
    pub token_type: String,
    /// Present for some grants.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until expiry.
    #[serde(default)]
    pub expires_in: u64,
    /// Granted scope.
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Convert into a cacheable [`Token`] of the given kind.
    pub fn into_token(self, kind: TokenKind) -> Token {
        Token::new(self.access_token, kind, self.expires_in)
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Body of a merchant bearer-token request.
///
/// The provider reports soft failures through `code`/`message` on a 2xx
/// response, so both are kept for the caller to inspect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerTokenResponse {
    /// Provider status code, if any.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Provider status message, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// Issued merchant bearer token.
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// Tenant the merchant belongs to.
    #[serde(default)]
    pub tenant: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_defaults_expiry_to_zero() {
        let response: TokenResponse =
            serde_json::from_value(serde_json::json!({"access_token": "abc"})).unwrap();
        assert_eq!(response.expires_in, 0);

        let token = response.into_token(TokenKind::User);
        assert_eq!(token.ttl(), Duration::ZERO);
        assert_eq!(token.bearer(), "Bearer abc");
    }

    #[test]
    fn debug_never_prints_secrets() {
        let token = Token::new("very-secret", TokenKind::Application, 60);
        assert!(!format!("{token:?}").contains("very-secret"));

        let response = TokenResponse { access_token: "very-secret".into(), ..Default::default() };
        assert!(!format!("{response:?}").contains("very-secret"));
    }
}
