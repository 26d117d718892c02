//! Request params and result payloads of the settings operations

use serde::{Deserialize, Serialize};

use crate::database::models::{PageDataList, SettingsData};

/// `{settings_data: {...}}` for Add and Update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDataParams {
    pub settings_data: Option<SettingsData>,
}

/// `{settings_data_id}` for Get and Delete
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDataIdParams {
    pub settings_data_id: Option<i64>,
}

/// `{key}` for the by-key lookup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDataKeyParams {
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDataListParams {
    pub skip_count: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsDataSummaryListParams {
    pub sort_expression: Option<String>,
    pub filter_condition: Option<String>,
    pub skip_count: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDataIdResult {
    pub settings_data_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDataResult {
    pub settings_data: SettingsData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDataListResult {
    pub settings_data_list: Vec<SettingsData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDataSummariesResult {
    pub settings_data_summaries: PageDataList<SettingsData>,
}
