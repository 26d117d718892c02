#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use setting_service::auth::{HttpAuthClient, TOKEN_HEADER};
use setting_service::config::{AppConfig, Environment};
use setting_service::services::SettingsService;
use setting_service::state::AppState;
use setting_service::database::InMemorySettingsStore;

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";
pub const ALICE_ID: i64 = 11;
pub const BOB_ID: i64 = 22;

#[derive(Clone)]
struct AuthorityState {
    tokens: Arc<HashMap<String, i64>>,
    calls: Arc<AtomicUsize>,
}

/// Auth authority double served over real HTTP on an ephemeral port
pub struct MockAuthority {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
}

impl MockAuthority {
    pub async fn start() -> Result<Self> {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = AuthorityState {
            tokens: Arc::new(HashMap::from([
                (ALICE.to_string(), ALICE_ID),
                (BOB.to_string(), BOB_ID),
            ])),
            calls: calls.clone(),
        };
        let router = Router::new()
            .route("/auth/authenticate", post(authenticate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind mock authority")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self { addr, calls })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn authenticate(
    State(state): State<AuthorityState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let id = body.get("id").cloned().unwrap_or(Value::Null);
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match state.tokens.get(token) {
        Some(user_id) => Json(json!({"jsonrpc": "2.0", "id": id, "result": {"user_id": user_id}})),
        None => Json(json!({"jsonrpc": "2.0", "id": id, "error": {"code": 1, "message": "token expired"}})),
    }
}

/// Service under test wired to the given authority URL and an in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemorySettingsStore>,
}

impl TestApp {
    pub fn new(auth_base_url: &str) -> Result<Self> {
        Self::with_store(auth_base_url, Arc::new(InMemorySettingsStore::starting_at(101)))
    }

    pub fn with_store(auth_base_url: &str, store: Arc<InMemorySettingsStore>) -> Result<Self> {
        let mut config = AppConfig::preset(Environment::Development);
        config.http.enable_request_logging = false;
        config.auth.base_url = auth_base_url.to_string();
        config.auth.service_token = "setting-service".to_string();
        config.auth.timeout_secs = 2;
        config.paging.max_page_size = 100;

        let authenticator = Arc::new(HttpAuthClient::new(&config.auth)?);
        let service = SettingsService::new(store.clone(), config.paging.clone());
        let router = setting_service::app(AppState::new(service, authenticator, config));
        Ok(Self { router, store })
    }

    /// POST a JSON-RPC call; returns HTTP status and decoded envelope
    pub async fn call(&self, path: &str, token: Option<&str>, params: Value) -> Result<(StatusCode, Value)> {
        let body = json!({"jsonrpc": "2.0", "id": 7, "params": params});
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        let request = builder.body(Body::from(body.to_string()))?;
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = serde_json::from_slice(&bytes).context("response body is not JSON")?;
        Ok((status, value))
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
