//! In-memory settings store.
//!
//! Follows the procedure contracts closely enough to run the service without
//! Postgres (`--memory-store`) and backs the unit and integration tests. It
//! records every login id it is handed.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::database::models::{SettingsData, SettingsDataSummaryRow};
use crate::database::store::SettingsStore;
use crate::error::ServiceError;
use crate::filter::{SortDirection, SortExpression};

#[derive(Debug, Clone)]
struct OwnedRow {
    login_id: i64,
    data: SettingsData,
}

pub struct InMemorySettingsStore {
    rows: Mutex<Vec<OwnedRow>>,
    next_id: AtomicI64,
    seen_login_ids: Mutex<Vec<i64>>,
    omit_count_marker: AtomicBool,
    omit_hidden_row: AtomicBool,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Store whose first generated id is `first_id`
    pub fn starting_at(first_id: i64) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(first_id),
            seen_login_ids: Mutex::new(Vec::new()),
            omit_count_marker: AtomicBool::new(false),
            omit_hidden_row: AtomicBool::new(false),
        }
    }

    /// Every login id passed to a procedure, in call order
    pub fn seen_login_ids(&self) -> Vec<i64> {
        lock(&self.seen_login_ids).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.seen_login_ids).len()
    }

    /// Make the summary procedure break its contract by leaving out `hidden_row_count`
    pub fn drop_summary_count_marker(&self) {
        self.omit_count_marker.store(true, AtomicOrdering::SeqCst);
    }

    /// Answer summaries with data rows only, like a `count(*) over ()` procedure
    pub fn drop_summary_hidden_row(&self) {
        self.omit_hidden_row.store(true, AtomicOrdering::SeqCst);
    }

    fn record(&self, login_id: i64) {
        lock(&self.seen_login_ids).push(login_id);
    }

    fn owned_by(&self, login_id: i64) -> Vec<SettingsData> {
        lock(&self.rows)
            .iter()
            .filter(|r| r.login_id == login_id)
            .map(|r| r.data.clone())
            .collect()
    }
}

impl Default for InMemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn settings_data_add(
        &self,
        login_id: i64,
        settings_data: &SettingsData,
    ) -> Result<Option<i64>, ServiceError> {
        self.record(login_id);
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let data = SettingsData {
            settings_data_id: Some(id),
            ..settings_data.clone()
        };
        lock(&self.rows).push(OwnedRow { login_id, data });
        Ok(Some(id))
    }

    async fn settings_data_delete(
        &self,
        login_id: i64,
        settings_data_id: i64,
    ) -> Result<Option<i64>, ServiceError> {
        self.record(login_id);
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|r| !(r.login_id == login_id && r.data.settings_data_id == Some(settings_data_id)));
        Ok((rows.len() < before).then_some(settings_data_id))
    }

    async fn settings_data_get(
        &self,
        login_id: i64,
        settings_data_id: i64,
    ) -> Result<Vec<SettingsData>, ServiceError> {
        self.record(login_id);
        Ok(self
            .owned_by(login_id)
            .into_iter()
            .filter(|d| d.settings_data_id == Some(settings_data_id))
            .collect())
    }

    async fn settings_data_get_value(
        &self,
        login_id: i64,
        key: &str,
    ) -> Result<Vec<SettingsData>, ServiceError> {
        self.record(login_id);
        Ok(self
            .owned_by(login_id)
            .into_iter()
            .filter(|d| d.key == key)
            .collect())
    }

    async fn settings_data_get_list(
        &self,
        login_id: i64,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsData>, ServiceError> {
        self.record(login_id);
        Ok(page(self.owned_by(login_id), skip, page_size))
    }

    async fn settings_data_get_summary_list(
        &self,
        login_id: i64,
        sort_expression: Option<&str>,
        filter_condition: Option<&str>,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsDataSummaryRow>, ServiceError> {
        self.record(login_id);

        let condition = FilterCondition::parse(filter_condition.unwrap_or_default())?;
        let sort = SortExpression::parse(sort_expression.unwrap_or_default())?;

        let mut matching: Vec<SettingsData> = self
            .owned_by(login_id)
            .into_iter()
            .filter(|d| condition.matches(d))
            .collect();
        let total = matching.len() as i64;

        matching.sort_by(|a, b| compare(&sort, a, b));

        let mut rows: Vec<SettingsDataSummaryRow> = page(matching, skip, page_size)
            .iter()
            .map(|d| SettingsDataSummaryRow::data(d, total))
            .collect();
        if !self.omit_hidden_row.load(AtomicOrdering::SeqCst) {
            rows.push(SettingsDataSummaryRow::hidden(total));
        }

        if self.omit_count_marker.load(AtomicOrdering::SeqCst) {
            for row in rows.iter_mut() {
                row.hidden_row_count = None;
            }
        }
        Ok(rows)
    }

    async fn settings_data_update(
        &self,
        login_id: i64,
        settings_data: &SettingsData,
    ) -> Result<Option<i64>, ServiceError> {
        self.record(login_id);
        let Some(id) = settings_data.settings_data_id else {
            return Ok(None);
        };
        let mut rows = lock(&self.rows);
        match rows
            .iter_mut()
            .find(|r| r.login_id == login_id && r.data.settings_data_id == Some(id))
        {
            Some(row) => {
                row.data = settings_data.clone();
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

fn page(rows: Vec<SettingsData>, skip: i64, page_size: i64) -> Vec<SettingsData> {
    rows.into_iter()
        .skip(skip.max(0) as usize)
        .take(page_size.max(0) as usize)
        .collect()
}

fn compare(sort: &SortExpression, a: &SettingsData, b: &SettingsData) -> Ordering {
    for term in sort.terms() {
        let ordering = match term.column.as_str() {
            "settings_data_id" => a.settings_data_id.cmp(&b.settings_data_id),
            "key" => a.key.cmp(&b.key),
            "value" => a.value.cmp(&b.value),
            "valid_from" => a.valid_from.cmp(&b.valid_from),
            "valid_to" => a.valid_to.cmp(&b.valid_to),
            _ => Ordering::Equal,
        };
        let ordering = match term.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.settings_data_id.cmp(&b.settings_data_id)
}

/// The small subset of filter conditions the in-memory store understands:
/// `<column> = '<literal>'` and `<column> like '<pattern>'` with `%` wildcards.
enum FilterCondition {
    All,
    Equals { column: String, literal: String },
    Like { column: String, pattern: String },
}

impl FilterCondition {
    fn parse(condition: &str) -> Result<Self, ServiceError> {
        let condition = condition.trim();
        if condition.is_empty() {
            return Ok(FilterCondition::All);
        }

        let unsupported = || ServiceError::persistence(format!("unsupported filter condition: {}", condition));

        let (column, rest) = condition.split_once(char::is_whitespace).ok_or_else(unsupported)?;
        let rest = rest.trim_start();
        let (operator, literal) = rest.split_once(char::is_whitespace).ok_or_else(unsupported)?;
        let literal = literal
            .trim()
            .strip_prefix('\'')
            .and_then(|l| l.strip_suffix('\''))
            .ok_or_else(unsupported)?
            .to_string();
        let column = column.to_ascii_lowercase();

        if operator == "=" {
            Ok(FilterCondition::Equals { column, literal })
        } else if operator.eq_ignore_ascii_case("like") {
            Ok(FilterCondition::Like { column, pattern: literal })
        } else {
            Err(unsupported())
        }
    }

    fn matches(&self, data: &SettingsData) -> bool {
        match self {
            FilterCondition::All => true,
            FilterCondition::Equals { column, literal } => {
                column_text(data, column).as_deref() == Some(literal.as_str())
            }
            FilterCondition::Like { column, pattern } => column_text(data, column)
                .map(|text| like(&text, pattern))
                .unwrap_or(false),
        }
    }
}

fn column_text(data: &SettingsData, column: &str) -> Option<String> {
    match column {
        "key" => Some(data.key.clone()),
        "value" => Some(data.value.clone()),
        "settings_data_id" => data.settings_data_id.map(|id| id.to_string()),
        _ => None,
    }
}

fn like(text: &str, pattern: &str) -> bool {
    let parts: Vec<&str> = pattern.split('%').collect();
    if parts.len() == 1 {
        return text == pattern;
    }
    let mut rest = text;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_matches_wildcards() {
        assert!(like("theme.dark", "theme%"));
        assert!(like("theme.dark", "%dark"));
        assert!(like("theme.dark", "%me.d%"));
        assert!(like("theme", "theme"));
        assert!(!like("theme", "lang%"));
        assert!(!like("theme.dark", "%light"));
    }

    #[tokio::test]
    async fn summary_filters_by_condition() {
        let store = InMemorySettingsStore::new();
        for key in ["ui.theme", "ui.lang", "mail.digest"] {
            store.settings_data_add(1, &SettingsData::new(key, "x")).await.unwrap();
        }

        let rows = store
            .settings_data_get_summary_list(1, Some("key"), Some("key like 'ui.%'"), 0, 1)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_visible());
        assert_eq!(rows[0].key.as_deref(), Some("ui.lang"));
        assert!(!rows[1].is_visible());
        assert!(rows.iter().all(|r| r.hidden_row_count == Some(2)));
    }

    #[tokio::test]
    async fn absent_sort_and_filter_mean_everything_in_id_order() {
        let store = InMemorySettingsStore::new();
        for key in ["b", "a"] {
            store.settings_data_add(1, &SettingsData::new(key, "x")).await.unwrap();
        }

        let rows = store.settings_data_get_summary_list(1, None, None, 0, 10).await.unwrap();
        let keys: Vec<_> = rows.iter().filter_map(|r| r.key.as_deref()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn without_hidden_row_an_empty_match_is_no_rows() {
        let store = InMemorySettingsStore::new();
        store.drop_summary_hidden_row();
        store.settings_data_add(1, &SettingsData::new("theme", "dark")).await.unwrap();

        let rows = store
            .settings_data_get_summary_list(1, None, Some("key = 'lang'"), 0, 10)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unsupported_condition_fails() {
        let store = InMemorySettingsStore::new();
        let err = store
            .settings_data_get_summary_list(1, None, Some("key >> 3"), 0, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(_)));
    }
}
