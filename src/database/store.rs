use async_trait::async_trait;

use crate::database::models::{SettingsData, SettingsDataSummaryRow};
use crate::error::ServiceError;

/// Input/output contract of the `setting.settings_data_*` procedures.
///
/// Every call takes the caller's login id as its first argument; the store
/// filters by it. Results are returned raw, the command layer decides what
/// they mean.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// `settings_data_add`: generated id, or None when the store reported none
    async fn settings_data_add(
        &self,
        login_id: i64,
        settings_data: &SettingsData,
    ) -> Result<Option<i64>, ServiceError>;

    /// `settings_data_delete`: deleted id, or None when nothing was affected
    async fn settings_data_delete(
        &self,
        login_id: i64,
        settings_data_id: i64,
    ) -> Result<Option<i64>, ServiceError>;

    async fn settings_data_get(
        &self,
        login_id: i64,
        settings_data_id: i64,
    ) -> Result<Vec<SettingsData>, ServiceError>;

    /// `settings_data_get_value`: rows matching `key` for this login
    async fn settings_data_get_value(
        &self,
        login_id: i64,
        key: &str,
    ) -> Result<Vec<SettingsData>, ServiceError>;

    async fn settings_data_get_list(
        &self,
        login_id: i64,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsData>, ServiceError>;

    /// `settings_data_get_summary_list`: absent sort/filter are passed as NULL
    async fn settings_data_get_summary_list(
        &self,
        login_id: i64,
        sort_expression: Option<&str>,
        filter_condition: Option<&str>,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsDataSummaryRow>, ServiceError>;

    /// `settings_data_update`: updated id, or None when nothing was affected
    async fn settings_data_update(
        &self,
        login_id: i64,
        settings_data: &SettingsData,
    ) -> Result<Option<i64>, ServiceError>;

    /// Round trip to the store without touching settings rows
    async fn ping(&self) -> Result<(), ServiceError>;
}
