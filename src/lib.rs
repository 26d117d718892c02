pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
#[cfg(test)]
pub mod testing;
pub mod types;

use axum::{
    http::{Method, Uri},
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::{not_found, Envelope};
use crate::handlers::settings_data;
use crate::state::AppState;
use crate::types::SettingsOperation;

pub use crate::error::{ServiceError, ServiceResult};

/// Full HTTP surface: authenticated settings routes, health, and a 404 envelope
pub fn app(state: AppState) -> Router {
    let request_logging = state.config.http.enable_request_logging;

    let router = Router::new()
        .merge(settings_routes(state.clone()))
        .route("/health", get(handlers::health))
        .fallback(fallback)
        .layer(CorsLayer::permissive())
        .with_state(state);

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn settings_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(SettingsOperation::Add.path(), post(settings_data::settings_data_add))
        .route(SettingsOperation::Delete.path(), post(settings_data::settings_data_delete))
        .route(SettingsOperation::Get.path(), post(settings_data::settings_data_get))
        .route(SettingsOperation::GetByKey.path(), post(settings_data::settings_data_get_value))
        .route(SettingsOperation::GetList.path(), post(settings_data::settings_data_get_list))
        .route(
            SettingsOperation::GetSummaryList.path(),
            post(settings_data::settings_data_get_summary_list),
        )
        .route(SettingsOperation::Update.path(), post(settings_data::settings_data_update))
        .route_layer(from_fn_with_state(state, middleware::auth_gate))
}

async fn fallback(method: Method, uri: Uri) -> Envelope {
    tracing::warn!("No route for {} {}", method, uri.path());
    not_found(&method, uri.path())
}
