//! Error types used throughout the SDK

use thiserror::Error;

/// Coarse classification of [`PerxError`] for logging and caller policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No usable response came back (missing body, I/O failure).
    Transport,
    /// The provider answered and refused the request.
    Provider,
    /// Credentials were rejected while issuing a token.
    Authentication,
    /// Caller input was rejected locally, before any request.
    Input,
    /// The provider answered with a shape the SDK does not understand.
    Contract,
    /// The SDK itself is misconfigured.
    Config,
}

/// Main error type for the SDK
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerxError {
    /// No parseable body was returned for the given HTTP status.
    #[error("Invalid response from server (httpStatusCode {status})")]
    TransportFailure {
        /// HTTP status of the bodiless response.
        status: u16,
    },

    /// The provider reported an error in the response body.
    #[error("{message}")]
    ProviderRejected {
        /// Provider error code, verbatim.
        code: String,
        /// Provider error message, verbatim.
        message: String,
    },

    /// A token-issuance call answered 401.
    #[error("Invalid token")]
    Unauthorized,

    /// Caller input rejected before any network call.
    #[error("Bad input: {0}")]
    BadInput(String),

    /// The response did not match the declared envelope shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The request never produced an HTTP status (connect failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PerxError {
    /// Shorthand for [`PerxError::ProviderRejected`].
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderRejected { code: code.into(), message: message.into() }
    }

    /// Shorthand for [`PerxError::BadInput`].
    pub fn bad_input(reason: impl Into<String>) -> Self {
        Self::BadInput(reason.into())
    }

    /// Shorthand for [`PerxError::MalformedPayload`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload(reason.into())
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> String {
        match self {
            Self::TransportFailure { .. } => "http-failed".to_string(),
            Self::ProviderRejected { code, .. } => format!("perx-error:{code}"),
            Self::Unauthorized => "unauthorized".to_string(),
            Self::BadInput(_) => "perx-bad-input".to_string(),
            Self::MalformedPayload(_) => "perx-malformed-payload".to_string(),
            Self::Network(_) => "network-failed".to_string(),
            Self::Config(_) => "config-invalid".to_string(),
        }
    }

    /// Get the error category for this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::TransportFailure { .. } | Self::Network(_) => ErrorCategory::Transport,
            Self::ProviderRejected { .. } => ErrorCategory::Provider,
            Self::Unauthorized => ErrorCategory::Authentication,
            Self::BadInput(_) => ErrorCategory::Input,
            Self::MalformedPayload(_) => ErrorCategory::Contract,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// HTTP status carried by the error, if any.
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::TransportFailure { status } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Stable label suitable for structured log fields.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TransportFailure { .. } => "transport_failure",
            Self::ProviderRejected { .. } => "provider_rejected",
            Self::Unauthorized => "unauthorized",
            Self::BadInput(_) => "bad_input",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, PerxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_message_carries_status() {
        let err = PerxError::TransportFailure { status: 502 };
        assert_eq!(err.to_string(), "Invalid response from server (httpStatusCode 502)");
        assert_eq!(err.code(), "http-failed");
        assert_eq!(err.http_status(), Some(502));
    }

    #[test]
    fn provider_rejection_keeps_code_and_message_verbatim() {
        let err = PerxError::rejected("4103", "not enough points");
        assert_eq!(err.to_string(), "not enough points");
        assert_eq!(err.code(), "perx-error:4103");
        assert_eq!(err.category(), ErrorCategory::Provider);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(PerxError::Unauthorized.category(), ErrorCategory::Authentication);
        assert_eq!(PerxError::bad_input("x").category(), ErrorCategory::Input);
        assert_eq!(PerxError::malformed("x").category(), ErrorCategory::Contract);
        assert_eq!(PerxError::Network("x".into()).category(), ErrorCategory::Transport);
        assert_eq!(PerxError::Config("x".into()).category(), ErrorCategory::Config);
    }

    #[test]
    fn unauthorized_matches_provider_wording() {
        assert_eq!(PerxError::Unauthorized.to_string(), "Invalid token");
        assert_eq!(PerxError::Unauthorized.code(), "unauthorized");
        assert_eq!(PerxError::bad_input("no identifier").code(), "perx-bad-input");
    }
}
