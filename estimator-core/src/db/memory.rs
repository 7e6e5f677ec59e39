//! Process-local repository backend.
//!
//! Records live for as long as the repository value does. Useful for tests
//! and for running without a database file.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{EstimateRepository, RepositoryError};
use crate::models::{NewSavedEstimate, SavedEstimate};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<SavedEstimate>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<SavedEstimate>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|e| RepositoryError::Database(format!("memory store poisoned: {e}")))
    }
}

#[async_trait]
impl EstimateRepository for MemoryRepository {
    async fn save(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, RepositoryError> {
        let mut records = self.records()?;
        let record = SavedEstimate {
            id: records.len() as i64 + 1,
            kind: estimate.kind,
            description: estimate.description,
            value: estimate.value,
            details: estimate.details,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<SavedEstimate, RepositoryError> {
        self.records()?
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<SavedEstimate>, RepositoryError> {
        Ok(self.records()?.iter().rev().cloned().collect())
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend.
///
/// The connection string is ignored; every `create` call starts empty.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn EstimateRepository>, RepositoryError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}
