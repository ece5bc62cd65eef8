//! In-process stand-in for the provider API

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use perx_core::{ApiRequest, ApiResponse, HttpMethod, PerxClient, ProxyManager, Transport};
use perx_domain::{PerxConfig, PerxError, Result as DomainResult};
use serde_json::{json, Value};

type Responder = Box<dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync>;

struct Route {
    method: HttpMethod,
    path: String,
    responder: Responder,
}

/// Routes requests by method and exact path and records every request.
#[derive(Default)]
pub struct MockProvider {
    routes: Mutex<Vec<Route>>,
    log: Mutex<Vec<ApiRequest>>,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `method path` with a fixed status and body.
    pub fn on(&self, method: HttpMethod, path: &str, status: u16, body: Value) {
        self.on_with(method, path, move |_| ApiResponse::new(status, Some(body.clone())));
    }

    /// Answer `method path` with a computed response.
    pub fn on_with<F>(&self, method: HttpMethod, path: &str, responder: F)
    where
        F: Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    {
        self.routes.lock().push(Route { method, path: path.to_string(), responder: Box::new(responder) });
    }

    /// Answer token requests: user tokens echo their scope, application
    /// tokens are fixed.
    pub fn with_token_endpoint(&self) {
        self.on_with(HttpMethod::Post, "/v4/oauth/token", |request| {
            let scope = request.body.as_ref().and_then(|body| body.get("scope")).and_then(Value::as_str);
            let access_token = match scope {
                Some(scope) => format!("user:{scope}"),
                None => "application-token".to_string(),
            };
            ApiResponse::new(
                200,
                Some(json!({"access_token": access_token, "token_type": "bearer", "expires_in": 3600})),
            )
        });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().clone()
    }

    pub fn count(&self, method: HttpMethod, path: &str) -> usize {
        self.log.lock().iter().filter(|request| request.method == method && request.path == path).count()
    }

    /// Token requests carrying a `scope`, i.e. user tokens.
    pub fn user_token_requests(&self) -> usize {
        self.token_requests(true)
    }

    pub fn application_token_requests(&self) -> usize {
        self.token_requests(false)
    }

    fn token_requests(&self, scoped: bool) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|request| request.path == "/v4/oauth/token")
            .filter(|request| {
                request.body.as_ref().and_then(|body| body.get("scope")).is_some() == scoped
            })
            .count()
    }
}

#[async_trait]
impl Transport for MockProvider {
    async fn send(&self, request: ApiRequest) -> DomainResult<ApiResponse> {
        self.log.lock().push(request.clone());
        let routes = self.routes.lock();
        routes
            .iter()
            .find(|route| route.method == request.method && route.path == request.path)
            .map(|route| (route.responder)(&request))
            .ok_or_else(|| PerxError::Network(format!("no route for {} {}", request.method, request.path)))
    }
}

pub fn config() -> PerxConfig {
    let mut config = PerxConfig::new("https://perx.example", "client-id", "client-secret");
    config.microsite_base_url = Some("https://game.example".to_string());
    config
}

pub fn manager(provider: &Arc<MockProvider>) -> ProxyManager {
    ProxyManager::new(PerxClient::new(provider.clone(), config()))
}
