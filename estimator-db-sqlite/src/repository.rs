use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estimator_core::{
    EstimateDetails, EstimateKind, EstimateOwner, EstimateRepository, NewSavedEstimate,
    RepositoryError, SavedEstimate,
};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::decimal::get_decimal;

const SELECT_COLUMNS: &str =
    "SELECT id, kind, description, value, details, created_at FROM saved_estimate";

pub struct SqliteRepository {
    pool: SqlitePool,
    owner: EstimateOwner,
}

impl SqliteRepository {
    /// Open `database_url`, creating the file if it does not exist.
    ///
    /// Accepts a bare path (`estimates.db`), a sqlx URL
    /// (`sqlite:estimates.db`) or `:memory:`.
    pub async fn new(
        database_url: &str,
        owner: EstimateOwner,
    ) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        // One connection: the CLI never issues concurrent queries, and an
        // in-memory database only exists on the connection that created it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool, owner })
    }

    pub async fn new_with_pool(
        pool: SqlitePool,
        owner: EstimateOwner,
    ) -> Self {
        Self { pool, owner }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn owner(&self) -> &EstimateOwner {
        &self.owner
    }
}

fn row_to_saved_estimate(row: &sqlx::sqlite::SqliteRow) -> Result<SavedEstimate, RepositoryError> {
    let kind_str: String = row
        .try_get("kind")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let kind = EstimateKind::parse(&kind_str).ok_or_else(|| {
        RepositoryError::Database(format!("Invalid estimate kind: {}", kind_str))
    })?;

    let details_json: Option<String> = row
        .try_get("details")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let details = details_json
        .map(|json| serde_json::from_str::<EstimateDetails>(&json))
        .transpose()
        .map_err(|e| RepositoryError::Database(format!("Failed to decode details: {}", e)))?;

    Ok(SavedEstimate {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        kind,
        description: row
            .try_get("description")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        value: get_decimal(row, "value")?,
        details,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl EstimateRepository for SqliteRepository {
    async fn save(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, RepositoryError> {
        let now = Utc::now();
        let details = estimate
            .details
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Database(format!("Failed to encode details: {}", e)))?;

        let result = sqlx::query(
            "INSERT INTO saved_estimate (
                app_id, user_id, kind, description, value, details, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&self.owner.app_id)
        .bind(&self.owner.user_id)
        .bind(estimate.kind.as_str())
        .bind(&estimate.description)
        .bind(estimate.value.to_string())
        .bind(details)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!(id, kind = estimate.kind.as_str(), "saved estimate");
        self.get(id).await
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<SavedEstimate, RepositoryError> {
        let row = sqlx::query(&format!(
            "{} WHERE id = ? AND app_id = ? AND user_id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .bind(&self.owner.app_id)
        .bind(&self.owner.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row_to_saved_estimate(&row)
    }

    async fn list_all(&self) -> Result<Vec<SavedEstimate>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{} WHERE app_id = ? AND user_id = ? ORDER BY created_at DESC, id DESC",
            SELECT_COLUMNS
        ))
        .bind(&self.owner.app_id)
        .bind(&self.owner.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_saved_estimate).collect()
    }
}
