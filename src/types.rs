/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Settings operations supported by the service
/// Used by the handlers, the facade and the envelope for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsOperation {
    Add,
    Delete,
    Get,
    GetByKey,
    GetList,
    GetSummaryList,
    Update,
}

impl SettingsOperation {
    /// Operation id as published in the API description
    pub fn operation_id(&self) -> &'static str {
        match self {
            SettingsOperation::Add => "settingSettingsDataAdd",
            SettingsOperation::Delete => "settingSettingsDataDelete",
            SettingsOperation::Get => "settingSettingsDataGet",
            SettingsOperation::GetByKey => "settingSettingsDataGetConfig",
            SettingsOperation::GetList => "settingSettingsDataGetList",
            SettingsOperation::GetSummaryList => "settingSettingsDataGetSummaryList",
            SettingsOperation::Update => "settingSettingsDataUpdate",
        }
    }

    /// Route path serving this operation
    pub fn path(&self) -> &'static str {
        match self {
            SettingsOperation::Add => "/setting/settings-data/add",
            SettingsOperation::Delete => "/setting/settings-data/delete",
            SettingsOperation::Get => "/setting/settings-data/get",
            SettingsOperation::GetByKey => "/setting/settings-data/get-config",
            SettingsOperation::GetList => "/setting/settings-data/get-list",
            SettingsOperation::GetSummaryList => "/setting/settings-data/get-summary-list",
            SettingsOperation::Update => "/setting/settings-data/update",
        }
    }
}

impl std::fmt::Display for SettingsOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.operation_id())
    }
}
