//! SDK configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_LANG, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_TOKEN_DURATION_SECONDS,
    DEFAULT_TOLERATED_STATUS_CEILING,
};
use crate::errors::{PerxError, Result};

/// Connection and credential settings for the provider.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerxConfig {
    /// Provider API root, e.g. `https://api.perxtech.io`.
    pub base_url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Lifetime requested for user tokens.
    #[serde(default = "default_token_duration")]
    pub token_duration_seconds: u64,
    /// Language used when a façade is created without one.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Base of the hosted campaign microsite, if the tenant has one.
    #[serde(default)]
    pub microsite_base_url: Option<String>,
    /// Per-request timeout enforced by the transport.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Responses with a status at or above this value are treated as bodiless.
    #[serde(default = "default_status_ceiling")]
    pub tolerated_status_ceiling: u16,
}

impl PerxConfig {
    /// Build a config with defaults for everything but the credentials.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_duration_seconds: DEFAULT_TOKEN_DURATION_SECONDS,
            lang: DEFAULT_LANG.to_string(),
            microsite_base_url: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            tolerated_status_ceiling: DEFAULT_TOLERATED_STATUS_CEILING,
        }
    }

    /// Check that the config can be used to reach the provider.
    ///
    /// # Errors
    /// Returns `PerxError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(PerxError::Config("client_id must not be empty".into()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(PerxError::Config("client_secret must not be empty".into()));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| PerxError::Config(format!("Invalid base_url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PerxError::Config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.tolerated_status_ceiling < 400 {
            return Err(PerxError::Config(format!(
                "tolerated_status_ceiling must be at least 400, got {}",
                self.tolerated_status_ceiling
            )));
        }
        Ok(())
    }

    /// `base_url` without a trailing slash.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl std::fmt::Debug for PerxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerxConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("token_duration_seconds", &self.token_duration_seconds)
            .field("lang", &self.lang)
            .field("microsite_base_url", &self.microsite_base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("tolerated_status_ceiling", &self.tolerated_status_ceiling)
            .finish()
    }
}

const fn default_token_duration() -> u64 {
    DEFAULT_TOKEN_DURATION_SECONDS
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

const fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECONDS
}

const fn default_status_ceiling() -> u16 {
    DEFAULT_TOLERATED_STATUS_CEILING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied_when_fields_are_missing() {
        let config: PerxConfig = serde_json::from_str(
            r#"{"base_url":"https://perx.example","client_id":"id","client_secret":"secret"}"#,
        )
        .unwrap();

        assert_eq!(config.token_duration_seconds, 3600);
        assert_eq!(config.lang, "en");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.tolerated_status_ceiling, 450);
        assert!(config.microsite_base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_credentials_and_bad_urls() {
        let mut config = PerxConfig::new("https://perx.example", "", "secret");
        assert!(matches!(config.validate(), Err(PerxError::Config(_))));

        config.client_id = "id".into();
        config.base_url = "ftp://perx.example".into();
        assert!(matches!(config.validate(), Err(PerxError::Config(_))));

        config.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(PerxError::Config(_))));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let config = PerxConfig::new("https://perx.example", "id", "top-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn api_root_strips_trailing_slash() {
        let config = PerxConfig::new("https://perx.example/", "id", "secret");
        assert_eq!(config.api_root(), "https://perx.example");
    }
}
