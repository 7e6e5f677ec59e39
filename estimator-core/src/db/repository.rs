use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewSavedEstimate, SavedEstimate};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for saved estimates.
///
/// Records are write-once: a repository hands out ids on `save` and never
/// updates a stored record afterwards. Every method is scoped to the owner
/// the repository was opened for.
#[async_trait]
pub trait EstimateRepository: Send + Sync {
    /// Persist a new record and return it with its id and timestamp.
    async fn save(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, RepositoryError>;

    async fn get(
        &self,
        id: i64,
    ) -> Result<SavedEstimate, RepositoryError>;

    /// Every record, newest first.
    async fn list_all(&self) -> Result<Vec<SavedEstimate>, RepositoryError>;
}
