use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ServiceError;

/// A single key/value configuration record owned by one login identity.
///
/// `settings_data_id` is unset until the store assigns it. Both validity
/// bounds are optional; an absent bound is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SettingsData {
    #[serde(default)]
    pub settings_data_id: Option<i64>,
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
}

impl SettingsData {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            settings_data_id: None,
            key: key.into(),
            value: value.into(),
            valid_from: None,
            valid_to: None,
        }
    }

    pub fn with_id(mut self, settings_data_id: i64) -> Self {
        self.settings_data_id = Some(settings_data_id);
        self
    }
}

/// Rows in store return order
pub type SettingsDataList = Vec<SettingsData>;

/// One page of rows plus the row count of the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDataList<T> {
    pub data: Vec<T>,
    pub total_row_count: i64,
}

impl<T> PageDataList<T> {
    pub fn new(data: Vec<T>, total_row_count: i64) -> Self {
        Self { data, total_row_count }
    }
}

/// Raw row of `settings_data_get_summary_list`.
///
/// Data columns are nullable because count-only rows leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct SettingsDataSummaryRow {
    pub settings_data_id: Option<i64>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub hidden_is_empty: Option<bool>,
    pub hidden_row_count: Option<i64>,
}

impl SettingsDataSummaryRow {
    /// Visible data row carrying the page-independent count
    pub fn data(settings_data: &SettingsData, total_row_count: i64) -> Self {
        Self {
            settings_data_id: settings_data.settings_data_id,
            key: Some(settings_data.key.clone()),
            value: Some(settings_data.value.clone()),
            valid_from: settings_data.valid_from,
            valid_to: settings_data.valid_to,
            hidden_is_empty: Some(false),
            hidden_row_count: Some(total_row_count),
        }
    }

    /// Count-only row
    pub fn hidden(total_row_count: i64) -> Self {
        Self {
            hidden_is_empty: Some(true),
            hidden_row_count: Some(total_row_count),
            ..Default::default()
        }
    }

    /// `hidden_is_empty = false` marks a data row; true or NULL is count-only
    pub fn is_visible(&self) -> bool {
        self.hidden_is_empty == Some(false)
    }
}

impl TryFrom<SettingsDataSummaryRow> for SettingsData {
    type Error = ServiceError;

    fn try_from(row: SettingsDataSummaryRow) -> Result<Self, Self::Error> {
        let settings_data_id = row
            .settings_data_id
            .ok_or_else(|| ServiceError::contract("summary data row without settings_data_id"))?;
        let key = row
            .key
            .ok_or_else(|| ServiceError::contract("summary data row without key"))?;
        let value = row
            .value
            .ok_or_else(|| ServiceError::contract("summary data row without value"))?;

        Ok(SettingsData {
            settings_data_id: Some(settings_data_id),
            key,
            value,
            valid_from: row.valid_from,
            valid_to: row.valid_to,
        })
    }
}
