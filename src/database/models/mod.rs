pub mod settings_data;

pub use settings_data::{PageDataList, SettingsData, SettingsDataList, SettingsDataSummaryRow};
