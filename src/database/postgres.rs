use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::database::models::{SettingsData, SettingsDataSummaryRow};
use crate::database::store::SettingsStore;
use crate::error::ServiceError;

const ADD_SQL: &str =
    "SELECT settings_data_add AS settings_data_id FROM setting.settings_data_add($1, $2, $3, $4, $5);";
const DELETE_SQL: &str =
    "SELECT settings_data_delete AS settings_data_id FROM setting.settings_data_delete($1, $2);";
const GET_SQL: &str = "SELECT * FROM setting.settings_data_get($1, $2);";
const GET_VALUE_SQL: &str = "SELECT * FROM setting.settings_data_get_value($1, $2);";
const GET_LIST_SQL: &str = "SELECT * FROM setting.settings_data_get_list($1, $2, $3);";
const GET_SUMMARY_LIST_SQL: &str =
    "SELECT * FROM setting.settings_data_get_summary_list($1, $2, $3, $4, $5);";
const UPDATE_SQL: &str =
    "SELECT settings_data_update AS settings_data_id FROM setting.settings_data_update($1, $2, $3, $4, $5, $6);";

/// Postgres implementation of the settings procedures
#[derive(Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
    slow_query_threshold: Duration,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool, slow_query_threshold: Duration) -> Self {
        Self {
            pool,
            slow_query_threshold,
        }
    }

    fn observe(&self, procedure: &str, started: Instant) {
        let elapsed = started.elapsed();
        if elapsed > self.slow_query_threshold {
            tracing::warn!("Slow store call {} took {:?}", procedure, elapsed);
        } else {
            tracing::debug!("Store call {} took {:?}", procedure, elapsed);
        }
    }

    /// Read the single `settings_data_id` scalar the mutation procedures return
    async fn fetch_id(
        &self,
        procedure: &str,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Option<i64>, ServiceError> {
        let started = Instant::now();
        let row = query.fetch_optional(&self.pool).await;
        self.observe(procedure, started);

        match row? {
            Some(row) => Ok(row.try_get::<Option<i64>, _>("settings_data_id")?),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn settings_data_add(
        &self,
        login_id: i64,
        settings_data: &SettingsData,
    ) -> Result<Option<i64>, ServiceError> {
        let query = sqlx::query(ADD_SQL)
            .bind(login_id)
            .bind(&settings_data.key)
            .bind(&settings_data.value)
            .bind(settings_data.valid_from)
            .bind(settings_data.valid_to);
        self.fetch_id("settings_data_add", query).await
    }

    async fn settings_data_delete(
        &self,
        login_id: i64,
        settings_data_id: i64,
    ) -> Result<Option<i64>, ServiceError> {
        let query = sqlx::query(DELETE_SQL).bind(login_id).bind(settings_data_id);
        self.fetch_id("settings_data_delete", query).await
    }

    async fn settings_data_get(
        &self,
        login_id: i64,
        settings_data_id: i64,
    ) -> Result<Vec<SettingsData>, ServiceError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, SettingsData>(GET_SQL)
            .bind(login_id)
            .bind(settings_data_id)
            .fetch_all(&self.pool)
            .await;
        self.observe("settings_data_get", started);
        Ok(rows?)
    }

    async fn settings_data_get_value(
        &self,
        login_id: i64,
        key: &str,
    ) -> Result<Vec<SettingsData>, ServiceError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, SettingsData>(GET_VALUE_SQL)
            .bind(login_id)
            .bind(key)
            .fetch_all(&self.pool)
            .await;
        self.observe("settings_data_get_value", started);
        Ok(rows?)
    }

    async fn settings_data_get_list(
        &self,
        login_id: i64,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsData>, ServiceError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, SettingsData>(GET_LIST_SQL)
            .bind(login_id)
            .bind(skip)
            .bind(page_size)
            .fetch_all(&self.pool)
            .await;
        self.observe("settings_data_get_list", started);
        Ok(rows?)
    }

    async fn settings_data_get_summary_list(
        &self,
        login_id: i64,
        sort_expression: Option<&str>,
        filter_condition: Option<&str>,
        skip: i64,
        page_size: i64,
    ) -> Result<Vec<SettingsDataSummaryRow>, ServiceError> {
        let started = Instant::now();
        let rows = sqlx::query_as::<_, SettingsDataSummaryRow>(GET_SUMMARY_LIST_SQL)
            .bind(login_id)
            .bind(sort_expression)
            .bind(filter_condition)
            .bind(skip)
            .bind(page_size)
            .fetch_all(&self.pool)
            .await;
        self.observe("settings_data_get_summary_list", started);
        Ok(rows?)
    }

    async fn settings_data_update(
        &self,
        login_id: i64,
        settings_data: &SettingsData,
    ) -> Result<Option<i64>, ServiceError> {
        let query = sqlx::query(UPDATE_SQL)
            .bind(login_id)
            .bind(settings_data.settings_data_id)
            .bind(&settings_data.key)
            .bind(&settings_data.value)
            .bind(settings_data.valid_from)
            .bind(settings_data.valid_to);
        self.fetch_id("settings_data_update", query).await
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
