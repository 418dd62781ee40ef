//! Store port for trigger persistence.

use crate::trigger::domain::{TriggerFilter, TriggerKey, TriggerRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for trigger store operations.
pub type TriggerStoreResult<T> = Result<T, TriggerStoreError>;

/// Trigger persistence contract.
///
/// The store is the source of truth; the cache only ever reads it through
/// [`TriggerStore::scan`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriggerStore: Send + Sync {
    /// Creates the backing table if it is missing. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::Persistence`] when the schema cannot be
    /// created.
    async fn ensure_schema(&self) -> TriggerStoreResult<()>;

    /// Returns `true` when a record with `key` exists.
    async fn exists(&self, key: &TriggerKey) -> TriggerStoreResult<bool>;

    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::Duplicate`] when the key already exists.
    async fn insert(&self, record: &TriggerRecord) -> TriggerStoreResult<()>;

    /// Overwrites the reply and update timestamp of an existing record.
    ///
    /// The creation timestamp, and therefore the record's position within
    /// its tenant, is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::NotFound`] when the key does not exist.
    async fn update(&self, record: &TriggerRecord) -> TriggerStoreResult<()>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerStoreError::NotFound`] when the key does not exist.
    async fn delete(&self, key: &TriggerKey) -> TriggerStoreResult<()>;

    /// Returns the records selected by `filter` in insertion order.
    async fn scan(&self, filter: TriggerFilter) -> TriggerStoreResult<Vec<TriggerRecord>>;
}

/// Errors returned by trigger store implementations.
#[derive(Debug, Clone, Error)]
pub enum TriggerStoreError {
    /// A record with the same key already exists.
    #[error("duplicate trigger: {0}")]
    Duplicate(TriggerKey),

    /// The record was not found.
    #[error("trigger not found: {0}")]
    NotFound(TriggerKey),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TriggerStoreError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
