//! reqwest-backed [`Transport`]

use std::time::{Duration, Instant};

use async_trait::async_trait;
use perx_core::{ApiRequest, ApiResponse, HttpMethod, Transport};
use perx_domain::{PerxConfig, PerxError, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::client::HttpClient;
use crate::errors::InfraError;

const USER_AGENT: &str = concat!("perx-sdk/", env!("CARGO_PKG_VERSION"));

/// Sends [`ApiRequest`]s to the configured provider with reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
    base_url: String,
    status_ceiling: u16,
}

impl ReqwestTransport {
    /// Build a transport with its own HTTP client, honouring the configured
    /// request timeout.
    ///
    /// # Errors
    /// `Config` when the config is invalid or the HTTP client cannot be built.
    pub fn new(config: &PerxConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(http, config))
    }

    /// Use an existing HTTP client.
    pub fn with_client(http: HttpClient, config: &PerxConfig) -> Self {
        Self {
            http,
            base_url: config.api_root().to_string(),
            status_ceiling: config.tolerated_status_ceiling,
        }
    }

    fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|err| PerxError::from(InfraError::from(err)))
    }
}

const fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
    }
}

/// Empty and non-JSON bodies count as absent.
fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let started = Instant::now();
        let url = self.url(&request.path)?;

        let mut builder =
            self.http.request(to_method(request.method), url).header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(lang) = &request.lang {
            builder = builder.header(ACCEPT_LANGUAGE, lang);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = self.http.send(builder).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| PerxError::from(InfraError::from(err)))?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        debug!(
            method = %request.method,
            path = %request.path,
            status,
            elapsed_ms,
            "provider call finished"
        );

        if status >= self.status_ceiling {
            warn!(
                method = %request.method,
                path = %request.path,
                status,
                ceiling = self.status_ceiling,
                "dropping body of response above tolerated status"
            );
            return Ok(ApiResponse::new(status, None));
        }

        let body = parse_body(&bytes);
        if status >= 400 && body.is_some() {
            warn!(method = %request.method, path = %request.path, status, "provider rejected request");
        }

        Ok(ApiResponse::new(status, body))
    }
}
