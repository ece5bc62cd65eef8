//! Conversions from external infrastructure errors into SDK errors.

use perx_domain::PerxError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the SDK error.
#[derive(Debug)]
pub struct InfraError(pub PerxError);

impl From<InfraError> for PerxError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PerxError> for InfraError {
    fn from(value: PerxError) -> Self {
        Self(value)
    }
}

trait IntoPerxError {
    fn into_perx(self) -> PerxError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PerxError */
/* -------------------------------------------------------------------------- */

impl IntoPerxError for HttpError {
    fn into_perx(self) -> PerxError {
        if self.is_timeout() {
            return PerxError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PerxError::Network("HTTP connection failure".into());
        }

        // Only produced by `error_for_status`; the body is gone at this point.
        if let Some(status) = self.status() {
            return PerxError::TransportFailure { status: status.as_u16() };
        }

        if self.is_builder() {
            return PerxError::Config(format!("invalid HTTP request: {self}"));
        }

        PerxError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_perx())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → PerxError */
/* -------------------------------------------------------------------------- */

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        Self(PerxError::Config(format!("Invalid request URL: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn error_for_status_maps_to_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::BAD_GATEWAY))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: PerxError = InfraError::from(error).into();
        assert_eq!(mapped, PerxError::TransportFailure { status: 502 });
    }

    #[tokio::test]
    async fn refused_connection_maps_to_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: PerxError = InfraError::from(error).into();
        assert!(matches!(mapped, PerxError::Network(_)), "got {mapped:?}");
    }

    #[test]
    fn bad_url_maps_to_config_error() {
        let error = url::Url::parse("::nope").unwrap_err();
        let mapped: PerxError = InfraError::from(error).into();
        assert!(matches!(mapped, PerxError::Config(_)));
    }
}
