mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{MockAuthority, TestApp, ALICE, ALICE_ID};

const GET_LIST: &str = "/setting/settings-data/get-list";

#[tokio::test]
async fn missing_token_is_auth_error_with_http_ok() -> Result<()> {
    common::init_tracing();
    let authority = MockAuthority::start().await?;
    let app = TestApp::new(&authority.base_url())?;

    let (status, body) = app.call(GET_LIST, None, json!({"page_size": 10})).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 7);
    assert_eq!(body["error"]["code"], 1);
    assert!(body.get("result").is_none());
    assert_eq!(authority.calls(), 0);
    assert_eq!(app.store.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn rejected_token_carries_authority_message() -> Result<()> {
    let authority = MockAuthority::start().await?;
    let app = TestApp::new(&authority.base_url())?;

    let (status, body) = app.call(GET_LIST, Some("stolen"), json!({"page_size": 10})).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], 1);
    assert_eq!(body["error"]["message"], "token expired");
    assert_eq!(authority.calls(), 1);
    assert_eq!(app.store.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn unreachable_authority_is_transport_error() -> Result<()> {
    let app = TestApp::new("http://127.0.0.1:1")?;

    let (status, body) = app.call(GET_LIST, Some(ALICE), json!({"page_size": 10})).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], 4);
    assert_eq!(app.store.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn accepted_token_scopes_store_calls_to_resolved_login() -> Result<()> {
    let authority = MockAuthority::start().await?;
    let app = TestApp::new(&authority.base_url())?;

    let (status, body) = app.call(GET_LIST, Some(ALICE), json!({"page_size": 10})).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["settings_data_list"], json!([]));
    assert_eq!(app.store.seen_login_ids(), vec![ALICE_ID]);
    Ok(())
}

#[tokio::test]
async fn health_needs_no_token() -> Result<()> {
    let app = TestApp::new("http://127.0.0.1:1")?;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())?;

    let (status, body) = app.send(request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404_envelope() -> Result<()> {
    let app = TestApp::new("http://127.0.0.1:1")?;

    let (status, body) = app.call("/setting/nope", Some(ALICE), json!({})).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], -1);
    assert_eq!(body["error"]["message"], "unknown error: Method POST for path /setting/nope");
    Ok(())
}
