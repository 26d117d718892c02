use std::sync::Arc;

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::services::SettingsService;

/// Shared handles cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SettingsService>,
    pub authenticator: Arc<dyn Authenticator>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        service: SettingsService,
        authenticator: Arc<dyn Authenticator>,
        config: AppConfig,
    ) -> Self {
        Self {
            service: Arc::new(service),
            authenticator,
            config: Arc::new(config),
        }
    }
}
