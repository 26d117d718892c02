use axum::http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ServiceError;

/// Inbound JSON-RPC style call: `{"jsonrpc": "2.0", "id": .., "params": {..}}`.
///
/// Parsed leniently so a correlation id can be echoed even when the body is
/// broken; the params are only validated when a handler asks for them.
#[derive(Debug, Clone)]
pub struct RpcCall {
    pub id: Value,
    pub method: Method,
    pub path: String,
    params: Option<Value>,
}

impl RpcCall {
    pub fn from_body(method: Method, path: impl Into<String>, body: &[u8]) -> Self {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();
        let id = parsed
            .as_ref()
            .and_then(|v| v.get("id"))
            .cloned()
            .unwrap_or(Value::Null);
        let params = parsed
            .as_ref()
            .and_then(|v| v.get("params"))
            .filter(|p| p.is_object())
            .cloned();

        Self {
            id,
            method,
            path: path.into(),
            params,
        }
    }

    /// Deserialize the params object; anything unusable is an Application error
    pub fn params<P: DeserializeOwned>(&self) -> Result<P, ServiceError> {
        let params = self.params.clone().ok_or_else(ServiceError::param_value)?;
        serde_json::from_value(params).map_err(|e| {
            tracing::debug!("Rejected params for {}: {}", self.path, e);
            ServiceError::application(format!("param value error: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::settings_data::{SettingsDataIdParams, SettingsDataParams};
    use crate::error::ErrorCode;
    use serde_json::json;

    fn call(body: &str) -> RpcCall {
        RpcCall::from_body(Method::POST, "/setting/settings-data/get", body.as_bytes())
    }

    #[test]
    fn keeps_correlation_id_and_params() {
        let c = call(r#"{"jsonrpc":"2.0","id":"req-9","params":{"settings_data_id":5}}"#);
        assert_eq!(c.id, json!("req-9"));
        let p: SettingsDataIdParams = c.params().unwrap();
        assert_eq!(p.settings_data_id, Some(5));
    }

    #[test]
    fn broken_body_still_yields_a_call() {
        let c = call("{not json");
        assert_eq!(c.id, Value::Null);
        let err = c.params::<SettingsDataIdParams>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::Application);
    }

    #[test]
    fn payload_missing_required_field_is_application_error() {
        let c = call(r#"{"id":1,"params":{"settings_data":{"value":"dark"}}}"#);
        let err = c.params::<SettingsDataParams>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::Application);
    }
}
