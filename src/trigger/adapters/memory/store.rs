//! In-memory trigger store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::trigger::{
    domain::{PersistedTriggerData, TriggerFilter, TriggerKey, TriggerRecord},
    ports::{TriggerStore, TriggerStoreError, TriggerStoreResult},
};

/// Thread-safe in-memory trigger store.
///
/// Records are kept in insertion order, which is also scan order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTriggerStore {
    records: Arc<RwLock<Vec<TriggerRecord>>>,
}

impl InMemoryTriggerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(err: impl std::fmt::Display) -> TriggerStoreError {
        TriggerStoreError::persistence(std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl TriggerStore for InMemoryTriggerStore {
    async fn ensure_schema(&self) -> TriggerStoreResult<()> {
        Ok(())
    }

    async fn exists(&self, key: &TriggerKey) -> TriggerStoreResult<bool> {
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records.iter().any(|record| record.key() == key))
    }

    async fn insert(&self, record: &TriggerRecord) -> TriggerStoreResult<()> {
        let mut records = self.records.write().map_err(Self::poisoned)?;
        if records.iter().any(|existing| existing.key() == record.key()) {
            return Err(TriggerStoreError::Duplicate(record.key().clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &TriggerRecord) -> TriggerStoreResult<()> {
        let mut records = self.records.write().map_err(Self::poisoned)?;
        let slot = records
            .iter_mut()
            .find(|existing| existing.key() == record.key())
            .ok_or_else(|| TriggerStoreError::NotFound(record.key().clone()))?;
        *slot = TriggerRecord::from_persisted(PersistedTriggerData {
            key: record.key().clone(),
            reply: record.reply().clone(),
            created_at: slot.created_at(),
            updated_at: record.updated_at(),
        });
        Ok(())
    }

    async fn delete(&self, key: &TriggerKey) -> TriggerStoreResult<()> {
        let mut records = self.records.write().map_err(Self::poisoned)?;
        let position = records
            .iter()
            .position(|record| record.key() == key)
            .ok_or_else(|| TriggerStoreError::NotFound(key.clone()))?;
        records.remove(position);
        Ok(())
    }

    async fn scan(&self, filter: TriggerFilter) -> TriggerStoreResult<Vec<TriggerRecord>> {
        let records = self.records.read().map_err(Self::poisoned)?;
        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
