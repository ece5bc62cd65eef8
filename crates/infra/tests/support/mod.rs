//! Shared fixtures for HTTP-level tests

use perx_core::ProxyManager;
use perx_domain::PerxConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const APPLICATION_TOKEN: &str = "application-token";

/// Config pointing at `server`.
pub fn config(server: &MockServer) -> PerxConfig {
    let mut config = PerxConfig::new(server.uri(), "client-id", "client-secret");
    config.microsite_base_url = Some("https://game.example".into());
    config
}

pub fn connect(server: &MockServer) -> ProxyManager {
    perx_infra::connect(config(server)).expect("manager")
}

/// Token endpoint answering `user:<scope>` for scoped requests and
/// [`APPLICATION_TOKEN`] otherwise.
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v4/oauth/token"))
        .respond_with(|request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
            let access_token = match body.get("scope").and_then(Value::as_str) {
                Some(scope) => format!("user:{scope}"),
                None => APPLICATION_TOKEN.to_string(),
            };
            ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "token_type": "bearer",
                "expires_in": 3600
            }))
        })
        .mount(server)
        .await;
}

/// Received requests whose path matches `expected`.
pub async fn requests_to(server: &MockServer, expected: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == expected)
        .collect()
}

pub fn voucher(id: u64, state: &str) -> Value {
    json!({"id": id, "name": format!("Voucher {id}"), "state": state})
}
