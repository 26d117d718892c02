//! Remote token verification against the auth service.
//!
//! One POST per inbound call: the caller's token travels in the `token`
//! header, this service identifies itself with its own user id and token in
//! the JSON-RPC params.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{token_fingerprint, Authenticator, UserCredentials};
use crate::config::AuthConfig;
use crate::error::ServiceError;

/// Header carrying the caller token, both inbound and towards the authority
pub const TOKEN_HEADER: &str = "token";

#[derive(Clone)]
pub struct HttpAuthClient {
    client: reqwest::Client,
    authenticate_url: String,
    service_user_id: i64,
    service_token: String,
}

impl HttpAuthClient {
    pub fn new(config: &AuthConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::transport(format!("Failed to create HTTP client: {}", e)))?;

        let authenticate_url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.authenticate_path.trim_start_matches('/')
        );

        tracing::info!("Auth delegation client targets {}", authenticate_url);

        Ok(Self {
            client,
            authenticate_url,
            service_user_id: config.service_user_id,
            service_token: config.service_token.clone(),
        })
    }

    pub fn authenticate_url(&self) -> &str {
        &self.authenticate_url
    }

    fn request_body(&self) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "params": {
                "user_id": self.service_user_id,
                "token": self.service_token,
            }
        })
    }
}

#[async_trait]
impl Authenticator for HttpAuthClient {
    async fn authenticate(&self, token: &str) -> Result<UserCredentials, ServiceError> {
        if token.trim().is_empty() {
            return Err(ServiceError::auth("Missing token"));
        }

        let fingerprint = token_fingerprint(token);
        tracing::debug!("Authenticating token {}", fingerprint);

        let response = self
            .client
            .post(&self.authenticate_url)
            .header(TOKEN_HEADER, token)
            .json(&self.request_body())
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        match parse_auth_response(&body) {
            Ok(credentials) => {
                tracing::debug!(
                    "Token {} resolved to login {}",
                    fingerprint,
                    credentials.login_id()
                );
                Ok(credentials)
            }
            Err(e) => {
                tracing::warn!("Token {} not accepted (HTTP {}): {}", fingerprint, status, e);
                Err(e)
            }
        }
    }
}

/// Interpret the authority's JSON-RPC answer.
///
/// `{"result": {"user_id": ..}}` yields credentials, `{"error": {"message": ..}}`
/// is a rejection, anything else means the authority broke its contract.
pub fn parse_auth_response(body: &Value) -> Result<UserCredentials, ServiceError> {
    if let Some(result) = body.get("result").filter(|r| !r.is_null()) {
        let login_id = match result.get("user_id") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.parse::<i64>().ok(),
            _ => None,
        };
        return login_id
            .map(UserCredentials::new)
            .ok_or_else(|| ServiceError::transport("Malformed auth service response: result without user_id"));
    }

    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Authentication failed");
        return Err(ServiceError::auth(message));
    }

    Err(ServiceError::transport(
        "Malformed auth service response: neither result nor error",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn config() -> AuthConfig {
        AuthConfig {
            base_url: "http://auth.local:8080/".to_string(),
            authenticate_path: "/auth/authenticate".to_string(),
            service_user_id: 2,
            service_token: "svc".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn joins_base_url_and_path() {
        let client = HttpAuthClient::new(&config()).unwrap();
        assert_eq!(client.authenticate_url(), "http://auth.local:8080/auth/authenticate");
    }

    #[test]
    fn request_body_carries_service_identity() {
        let client = HttpAuthClient::new(&config()).unwrap();
        let body = client.request_body();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["params"]["user_id"], 2);
        assert_eq!(body["params"]["token"], "svc");
    }

    #[test]
    fn result_yields_login_id() {
        let body = json!({"jsonrpc": "2.0", "id": 1, "result": {"user_id": 42, "login": "alice"}});
        assert_eq!(parse_auth_response(&body).unwrap().login_id(), 42);

        let body = json!({"result": {"user_id": "77"}});
        assert_eq!(parse_auth_response(&body).unwrap().login_id(), 77);
    }

    #[test]
    fn error_is_auth_with_authority_message() {
        let body = json!({"error": {"code": 401, "message": "token expired"}});
        let err = parse_auth_response(&body).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Auth);
        assert_eq!(err.to_string(), "token expired");
    }

    #[test]
    fn shapeless_answer_is_transport() {
        let err = parse_auth_response(&json!({"ok": true})).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Transport);

        let err = parse_auth_response(&json!({"result": {"login": "x"}})).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Transport);
    }

    #[tokio::test]
    async fn empty_token_never_leaves_the_process() {
        let client = HttpAuthClient::new(&config()).unwrap();
        let err = client.authenticate("  ").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Auth);
    }
}
