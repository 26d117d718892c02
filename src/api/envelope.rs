use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use super::rpc::RpcCall;
use crate::error::{ErrorCode, ServiceError};
use crate::types::SettingsOperation;

/// Uniform response: correlation id plus either a result or an error object.
///
/// Business failures keep HTTP 200; only routing-level misses use another
/// status.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl Envelope {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
            status_code: StatusCode::OK,
        }
    }

    pub fn failure(id: Value, error: &ServiceError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error.to_json()),
            status_code: StatusCode::OK,
        }
    }

    /// Render the outcome of a settings operation
    pub fn respond<T: Serialize>(
        call: &RpcCall,
        operation: SettingsOperation,
        outcome: Result<T, ServiceError>,
    ) -> Self {
        let outcome = outcome.and_then(|payload| {
            serde_json::to_value(&payload)
                .map_err(|e| ServiceError::unknown(format!("Failed to serialize response data: {}", e)))
        });

        match outcome {
            Ok(result) => {
                tracing::info!("{} completed", operation);
                Self::success(call.id.clone(), result)
            }
            Err(err) if err.is_unknown() => {
                tracing::error!(
                    "{} failed with unknown error: Method {} for path {}: {}",
                    operation,
                    call.method,
                    call.path,
                    err
                );
                Self::failure(call.id.clone(), &unknown_for(call, &err))
            }
            Err(err) => {
                match err.code() {
                    ErrorCode::Auth | ErrorCode::Application => {
                        tracing::warn!("{} failed ({:?}): {}", operation, err.code(), err)
                    }
                    _ => tracing::error!("{} failed ({:?}): {}", operation, err.code(), err),
                }
                Self::failure(call.id.clone(), &err)
            }
        }
    }
}

/// Generic error carrying the failing call's method and path
fn unknown_for(call: &RpcCall, err: &ServiceError) -> ServiceError {
    ServiceError::unknown(format!(
        "unknown error: Method {} for path {} with message {}",
        call.method, call.path, err
    ))
}

/// Envelope for requests that matched no route
pub fn not_found(method: &axum::http::Method, path: &str) -> Envelope {
    let err = ServiceError::unknown(format!("unknown error: Method {} for path {}", method, path));
    Envelope {
        jsonrpc: "2.0",
        id: Value::Null,
        result: None,
        error: Some(json!({ "code": ErrorCode::Unknown.as_i32(), "message": err.to_string() })),
        status_code: StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status_code;
        (status, Json(self)).into_response()
    }
}
