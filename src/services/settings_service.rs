use std::sync::Arc;

use crate::api::settings_data::{
    SettingsDataIdParams, SettingsDataIdResult, SettingsDataKeyParams, SettingsDataListParams,
    SettingsDataListResult, SettingsDataParams, SettingsDataResult, SettingsDataSummariesResult,
    SettingsDataSummaryListParams,
};
use crate::auth::UserCredentials;
use crate::config::PagingConfig;
use crate::database::command::SettingsDataCommand;
use crate::database::store::SettingsStore;
use crate::error::ServiceError;
use crate::filter::{Paging, SortExpression};

/// Facade between request handlers and the command layer.
///
/// Pulls the required parameters out of the request, forwards the caller's
/// credentials, and wraps command results in their response payloads.
/// Missing parameters fail here, before the store is touched.
#[derive(Clone)]
pub struct SettingsService {
    command: SettingsDataCommand,
    paging: PagingConfig,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, paging: PagingConfig) -> Self {
        Self {
            command: SettingsDataCommand::new(store),
            paging,
        }
    }

    pub async fn settings_data_add(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataParams,
    ) -> Result<SettingsDataIdResult, ServiceError> {
        tracing::info!("call: settingsDataAdd");
        let settings_data = params.settings_data.ok_or_else(ServiceError::param_value)?;
        let settings_data_id = self.command.add(credentials, &settings_data).await?;
        Ok(SettingsDataIdResult { settings_data_id })
    }

    pub async fn settings_data_delete(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataIdParams,
    ) -> Result<SettingsDataIdResult, ServiceError> {
        tracing::info!("call: settingsDataDelete");
        let id = params.settings_data_id.ok_or_else(ServiceError::param_value)?;
        let settings_data_id = self.command.delete(credentials, id).await?;
        Ok(SettingsDataIdResult { settings_data_id })
    }

    pub async fn settings_data_get(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataIdParams,
    ) -> Result<SettingsDataResult, ServiceError> {
        tracing::info!("call: settingsDataGet");
        let id = params.settings_data_id.ok_or_else(ServiceError::param_value)?;
        let settings_data = self.command.get(credentials, id).await?;
        Ok(SettingsDataResult { settings_data })
    }

    /// Absent keys come back as the empty instance (no id, empty key/value)
    pub async fn settings_data_get_value(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataKeyParams,
    ) -> Result<SettingsDataResult, ServiceError> {
        tracing::info!("call: settingsDataGetValue");
        let key = params.key.ok_or_else(ServiceError::param_value)?;
        let settings_data = self
            .command
            .get_by_key(credentials, &key)
            .await?
            .unwrap_or_default();
        Ok(SettingsDataResult { settings_data })
    }

    pub async fn settings_data_get_list(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataListParams,
    ) -> Result<SettingsDataListResult, ServiceError> {
        tracing::info!("call: settingsDataGetList");
        let paging = self.paging(params.skip_count, params.page_size)?;
        let settings_data_list = self
            .command
            .get_list(credentials, paging.skip, paging.page_size)
            .await?;
        Ok(SettingsDataListResult { settings_data_list })
    }

    pub async fn settings_data_get_summary_list(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataSummaryListParams,
    ) -> Result<SettingsDataSummariesResult, ServiceError> {
        tracing::info!("call: settingsDataGetSummaryList");
        let paging = self.paging(params.skip_count, params.page_size)?;
        let sort = params
            .sort_expression
            .as_deref()
            .map(SortExpression::parse)
            .transpose()?;

        let settings_data_summaries = self
            .command
            .get_summary_list(
                credentials,
                sort.as_ref().map(SortExpression::as_str),
                params.filter_condition.as_deref(),
                paging.skip,
                paging.page_size,
            )
            .await?;
        Ok(SettingsDataSummariesResult { settings_data_summaries })
    }

    pub async fn settings_data_update(
        &self,
        credentials: &UserCredentials,
        params: SettingsDataParams,
    ) -> Result<SettingsDataIdResult, ServiceError> {
        tracing::info!("call: settingsDataUpdate");
        let settings_data = params.settings_data.ok_or_else(ServiceError::param_value)?;
        if settings_data.settings_data_id.is_none() {
            return Err(ServiceError::application("settings_data.settings_data_id is required"));
        }
        let settings_data_id = self.command.update(credentials, &settings_data).await?;
        Ok(SettingsDataIdResult { settings_data_id })
    }

    pub async fn health(&self) -> Result<(), ServiceError> {
        self.command.ping().await
    }

    fn paging(&self, skip_count: Option<i64>, page_size: Option<i64>) -> Result<Paging, ServiceError> {
        let page_size = page_size.ok_or_else(|| ServiceError::application("page_size is required"))?;
        Ok(Paging::new(skip_count.unwrap_or(0), page_size, self.paging.max_page_size)?)
    }
}
