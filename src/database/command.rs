//! Settings command layer.
//!
//! Each operation forwards the caller's login id to one store procedure and
//! holds the store's answer to the operation's success contract. Identity
//! filtering itself is the store's job.

use std::sync::Arc;

use crate::auth::UserCredentials;
use crate::database::models::{PageDataList, SettingsData, SettingsDataList};
use crate::database::store::SettingsStore;
use crate::database::summary::parse_summary_rows;
use crate::error::ServiceError;

#[derive(Clone)]
pub struct SettingsDataCommand {
    store: Arc<dyn SettingsStore>,
}

impl SettingsDataCommand {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        tracing::info!("Creating SettingsDataCommand");
        Self { store }
    }

    pub async fn add(
        &self,
        credentials: &UserCredentials,
        settings_data: &SettingsData,
    ) -> Result<i64, ServiceError> {
        tracing::debug!("settings_data_add for login {}", credentials.login_id());
        let id = self
            .store
            .settings_data_add(credentials.login_id(), settings_data)
            .await?;
        require_id(id, "Setting SettingsDataAdd failed.")
    }

    pub async fn delete(
        &self,
        credentials: &UserCredentials,
        settings_data_id: i64,
    ) -> Result<i64, ServiceError> {
        tracing::debug!(
            "settings_data_delete {} for login {}",
            settings_data_id,
            credentials.login_id()
        );
        let id = self
            .store
            .settings_data_delete(credentials.login_id(), settings_data_id)
            .await?;
        require_id(id, "Setting SettingsDataDelete failed.")
    }

    pub async fn get(
        &self,
        credentials: &UserCredentials,
        settings_data_id: i64,
    ) -> Result<SettingsData, ServiceError> {
        tracing::debug!(
            "settings_data_get {} for login {}",
            settings_data_id,
            credentials.login_id()
        );
        self.store
            .settings_data_get(credentials.login_id(), settings_data_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ServiceError::persistence(format!(
                    "Setting SettingsDataGet failed: settings data {} not found",
                    settings_data_id
                ))
            })
    }

    /// Lookup by key; `None` means the login has no value configured
    pub async fn get_by_key(
        &self,
        credentials: &UserCredentials,
        key: &str,
    ) -> Result<Option<SettingsData>, ServiceError> {
        tracing::debug!("settings_data_get_value '{}' for login {}", key, credentials.login_id());
        let rows = self
            .store
            .settings_data_get_value(credentials.login_id(), key)
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn get_list(
        &self,
        credentials: &UserCredentials,
        skip: i64,
        page_size: i64,
    ) -> Result<SettingsDataList, ServiceError> {
        tracing::debug!(
            "settings_data_get_list skip={} page_size={} for login {}",
            skip,
            page_size,
            credentials.login_id()
        );
        self.store
            .settings_data_get_list(credentials.login_id(), skip, page_size)
            .await
    }

    pub async fn get_summary_list(
        &self,
        credentials: &UserCredentials,
        sort_expression: Option<&str>,
        filter_condition: Option<&str>,
        skip: i64,
        page_size: i64,
    ) -> Result<PageDataList<SettingsData>, ServiceError> {
        tracing::debug!(
            "settings_data_get_summary_list sort={:?} filter={:?} skip={} page_size={} for login {}",
            sort_expression,
            filter_condition,
            skip,
            page_size,
            credentials.login_id()
        );
        let rows = self
            .store
            .settings_data_get_summary_list(
                credentials.login_id(),
                sort_expression,
                filter_condition,
                skip,
                page_size,
            )
            .await?;
        parse_summary_rows(rows)
    }

    pub async fn update(
        &self,
        credentials: &UserCredentials,
        settings_data: &SettingsData,
    ) -> Result<i64, ServiceError> {
        tracing::debug!(
            "settings_data_update {:?} for login {}",
            settings_data.settings_data_id,
            credentials.login_id()
        );
        let id = self
            .store
            .settings_data_update(credentials.login_id(), settings_data)
            .await?;
        require_id(id, "Setting SettingsDataUpdate failed.")
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.store.ping().await
    }
}

/// Mutations succeed only with a positive id from the store
fn require_id(id: Option<i64>, message: &str) -> Result<i64, ServiceError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::persistence(message)),
    }
}
