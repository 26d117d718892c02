//! Summary-list row protocol.
//!
//! `settings_data_get_summary_list` answers with page rows interleaved with
//! count-only rows. Every row carries `hidden_row_count`, the size of the
//! whole filtered set; only rows with `hidden_is_empty = false` are data.
//! No rows at all means nothing matched.

use crate::database::models::{PageDataList, SettingsData, SettingsDataSummaryRow};
use crate::error::ServiceError;

/// Split raw summary rows into the visible page and the total row count
pub fn parse_summary_rows<I>(rows: I) -> Result<PageDataList<SettingsData>, ServiceError>
where
    I: IntoIterator<Item = SettingsDataSummaryRow>,
{
    let mut data = Vec::new();
    let mut total_row_count: Option<i64> = None;

    for (index, row) in rows.into_iter().enumerate() {
        let row_count = row.hidden_row_count.ok_or_else(|| {
            ServiceError::contract(format!("summary row {} has no hidden_row_count", index))
        })?;

        match total_row_count {
            None => total_row_count = Some(row_count),
            Some(seen) if seen != row_count => {
                return Err(ServiceError::contract(format!(
                    "summary rows disagree on total row count ({} vs {})",
                    seen, row_count
                )));
            }
            Some(_) => {}
        }

        if row.is_visible() {
            data.push(SettingsData::try_from(row)?);
        }
    }

    Ok(PageDataList::new(data, total_row_count.unwrap_or(0)))
}
