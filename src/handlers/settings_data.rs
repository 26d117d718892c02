//! POST /setting/settings-data/* handlers.
//!
//! Each handler decodes its params from the buffered call, delegates to the
//! service facade, and renders the outcome as an envelope.

use axum::extract::{Extension, State};

use crate::api::{Envelope, RpcCall};
use crate::auth::UserCredentials;
use crate::state::AppState;
use crate::types::SettingsOperation;

/// POST /setting/settings-data/add
pub async fn settings_data_add(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => state.service.settings_data_add(&credentials, params).await,
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::Add, outcome)
}

/// POST /setting/settings-data/delete
pub async fn settings_data_delete(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => state.service.settings_data_delete(&credentials, params).await,
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::Delete, outcome)
}

/// POST /setting/settings-data/get
pub async fn settings_data_get(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => state.service.settings_data_get(&credentials, params).await,
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::Get, outcome)
}

/// POST /setting/settings-data/get-config
pub async fn settings_data_get_value(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => state.service.settings_data_get_value(&credentials, params).await,
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::GetByKey, outcome)
}

/// POST /setting/settings-data/get-list
pub async fn settings_data_get_list(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => state.service.settings_data_get_list(&credentials, params).await,
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::GetList, outcome)
}

/// POST /setting/settings-data/get-summary-list
pub async fn settings_data_get_summary_list(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => {
            state
                .service
                .settings_data_get_summary_list(&credentials, params)
                .await
        }
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::GetSummaryList, outcome)
}

/// POST /setting/settings-data/update
pub async fn settings_data_update(
    State(state): State<AppState>,
    Extension(credentials): Extension<UserCredentials>,
    Extension(call): Extension<RpcCall>,
) -> Envelope {
    let outcome = match call.params() {
        Ok(params) => state.service.settings_data_update(&credentials, params).await,
        Err(e) => Err(e),
    };
    Envelope::respond(&call, SettingsOperation::Update, outcome)
}
