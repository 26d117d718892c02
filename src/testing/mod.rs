//! Test doubles for the auth authority and the store procedures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::auth::{Authenticator, UserCredentials};
use crate::database::models::{SettingsData, SettingsDataSummaryRow};
use crate::database::store::SettingsStore;
use crate::error::ServiceError;

/// Authority double resolving a fixed token table
pub struct StaticAuthenticator {
    tokens: HashMap<String, i64>,
    calls: AtomicUsize,
}

impl StaticAuthenticator {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(|(t, id)| (t.into(), id)).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<UserCredentials, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if token.trim().is_empty() {
            return Err(ServiceError::auth("Missing token"));
        }
        self.tokens
            .get(token)
            .map(|id| UserCredentials::new(*id))
            .ok_or_else(|| ServiceError::auth("Invalid token"))
    }
}

/// Arguments one summary call handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryArgs {
    pub login_id: i64,
    pub sort_expression: Option<String>,
    pub filter_condition: Option<String>,
    pub skip: i64,
    pub page_size: i64,
}

/// Store that answers summaries with canned rows and remembers what it was asked
#[derive(Default)]
pub struct RecordingSettingsStore {
    summary_rows: Vec<SettingsDataSummaryRow>,
    summary_calls: Mutex<Vec<SummaryArgs>>,
}

impl RecordingSettingsStore {
    pub fn answering(summary_rows: Vec<SettingsDataSummaryRow>) -> Self {
        Self {
            summary_rows,
            summary_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn summary_calls(&self) -> Vec<SummaryArgs> {
        self.summary_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsStore for RecordingSettingsStore {
    async fn settings_data_add(&self, _: i64, _: &SettingsData) -> Result<Option<i64>, ServiceError> {
        Ok(None)
    }

    async fn settings_data_delete(&self, _: i64, _: i64) -> Result<Option<i64>, ServiceError> {
        Ok(None)
    }

    async fn settings_data_get(&self, _: i64, _: i64) -> Result<Vec<SettingsData>, ServiceError> {
        Ok(Vec::new())
    }

    async fn settings_data_get_value(&self, _: i64, _: &str) -> Result<Vec<SettingsData>, ServiceError> {
        Ok(Vec::new())
    }

    async fn settings_data_get_list(&self, _: i64, _: i64, _: i64) -> Result<Vec<SettingsData>, ServiceError> {
        Ok(Vec::new())
    }

    async fn settings_data_get_summary_list(
        &self,
        login_id: i64,
        sort_expression: Option<&str>,
        filter_condition: Option<&str>,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsDataSummaryRow>, ServiceError> {
        self.summary_calls.lock().unwrap().push(SummaryArgs {
            login_id,
            sort_expression: sort_expression.map(str::to_string),
            filter_condition: filter_condition.map(str::to_string),
            skip,
            page_size,
        });
        Ok(self.summary_rows.clone())
    }

    async fn settings_data_update(&self, _: i64, _: &SettingsData) -> Result<Option<i64>, ServiceError> {
        Ok(None)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_authenticator_counts_calls() {
        let auth = StaticAuthenticator::new([("good", 5)]);
        assert_eq!(auth.authenticate("good").await.unwrap().login_id(), 5);
        assert!(auth.authenticate("bad").await.is_err());
        assert_eq!(auth.calls(), 2);
    }
}
