use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::api::{Envelope, RpcCall};
use crate::auth::{token_fingerprint, TOKEN_HEADER};
use crate::error::ServiceError;
use crate::state::AppState;

/// Resolves the caller before any settings handler runs.
///
/// Buffers the body so the correlation id is known up front, asks the
/// authority about the `token` header, and injects `UserCredentials` plus the
/// parsed `RpcCall` into the request extensions. Rejections are rendered as
/// an error envelope with HTTP 200 and the handler is never reached.
pub async fn auth_gate(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let trace_id = Uuid::new_v4();
    let (mut parts, body) = request.into_parts();
    let limit = state.config.http.max_request_size_bytes;

    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("[{}] Unreadable request body: {}", trace_id, e);
            let call = RpcCall::from_body(parts.method.clone(), parts.uri.path(), &[]);
            let err = ServiceError::application(format!("param value error: {}", e));
            return Envelope::failure(call.id, &err).into_response();
        }
    };

    let call = RpcCall::from_body(parts.method.clone(), parts.uri.path(), &bytes);

    let token = match extract_token(&headers) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!("[{}] {} {} rejected: {}", trace_id, call.method, call.path, err);
            return Envelope::failure(call.id, &err).into_response();
        }
    };

    let fingerprint = token_fingerprint(token);
    let credentials = match state.authenticator.authenticate(token).await {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::warn!(
                "[{}] {} {} token {} rejected ({:?}): {}",
                trace_id,
                call.method,
                call.path,
                fingerprint,
                err.code(),
                err
            );
            return Envelope::failure(call.id, &err).into_response();
        }
    };

    tracing::info!(
        "[{}] {} {} as login {} (token {})",
        trace_id,
        call.method,
        call.path,
        credentials.login_id(),
        fingerprint
    );

    parts.extensions.insert(credentials);
    parts.extensions.insert(call);
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn extract_token(headers: &HeaderMap) -> Result<&str, ServiceError> {
    let value = headers
        .get(TOKEN_HEADER)
        .ok_or_else(|| ServiceError::auth("Missing token header"))?;
    let token = value
        .to_str()
        .map_err(|_| ServiceError::auth("Invalid token header format"))?;
    if token.trim().is_empty() {
        return Err(ServiceError::auth("Empty token"));
    }
    Ok(token)
}
