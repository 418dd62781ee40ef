//! Per-tenant trigger cache.
//!
//! The cache mirrors the store as an immutable [`TriggerSnapshot`] behind a
//! lock. Readers clone the current `Arc` and match against it without
//! blocking writers; every write goes to the store first and is followed by
//! a rebuild that swaps in a fresh snapshot. Writes are serialized so two
//! rebuilds never race.

use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::tenant::TenantId;
use crate::trigger::{
    domain::{
        TenantTriggers, TriggerFilter, TriggerKey, TriggerRecord, TriggerReply, TriggerSnapshot,
        TriggerText,
    },
    ports::{TriggerStore, TriggerStoreError},
};

/// Errors returned by cache write operations.
#[derive(Debug, Clone, Error)]
pub enum TriggerCacheError {
    /// The trigger to remove does not exist.
    #[error("trigger not found: {0}")]
    NotFound(TriggerKey),
    /// The store failed.
    #[error(transparent)]
    Store(#[from] TriggerStoreError),
}

/// Result type for cache operations.
pub type TriggerCacheResult<T> = Result<T, TriggerCacheError>;

/// In-memory mirror of the trigger store.
pub struct TriggerCache<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    snapshot: RwLock<Arc<TriggerSnapshot>>,
    writes: Mutex<()>,
}

impl<S, C> TriggerCache<S, C>
where
    S: TriggerStore,
    C: Clock + Send + Sync,
{
    /// Creates an empty cache. Call [`Self::rebuild`] to populate it.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            snapshot: RwLock::new(Arc::new(TriggerSnapshot::default())),
            writes: Mutex::new(()),
        }
    }

    /// Ensures the store schema exists and loads every tenant.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerCacheError::Store`] when the schema cannot be created
    /// or the initial scan fails.
    pub async fn load(store: Arc<S>, clock: Arc<C>) -> TriggerCacheResult<Self> {
        store.ensure_schema().await?;
        let cache = Self::new(store, clock);
        cache.rebuild(None).await?;
        Ok(cache)
    }

    /// Replaces cached triggers with a fresh scan of the store.
    ///
    /// With a tenant, only that tenant's entry is replaced; without one the
    /// whole cache is. Readers see either the old or the new snapshot, never
    /// a partially built one. On failure the previous snapshot stays.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerCacheError::Store`] when the scan fails.
    pub async fn rebuild(&self, tenant: Option<TenantId>) -> TriggerCacheResult<()> {
        let _guard = self.writes.lock().await;
        self.refresh(tenant).await
    }

    /// Stores `reply` under `trigger` and rebuilds the cache.
    ///
    /// An existing trigger keeps its position; a new one is appended.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerCacheError::Store`] when the store write or the
    /// rebuild fails.
    pub async fn upsert(
        &self,
        tenant: TenantId,
        trigger: TriggerText,
        reply: TriggerReply,
    ) -> TriggerCacheResult<()> {
        let _guard = self.writes.lock().await;
        let record = TriggerRecord::new(TriggerKey::new(tenant, trigger), reply, &*self.clock);

        if self.store.exists(record.key()).await? {
            self.store.update(&record).await?;
            debug!(key = %record.key(), "trigger updated");
        } else {
            self.store.insert(&record).await?;
            debug!(key = %record.key(), "trigger inserted");
        }
        self.refresh(None).await
    }

    /// Deletes `trigger` and rebuilds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerCacheError::NotFound`] when the trigger does not
    /// exist, leaving the cache untouched, or [`TriggerCacheError::Store`]
    /// when the store fails.
    pub async fn remove(&self, tenant: TenantId, trigger: TriggerText) -> TriggerCacheResult<()> {
        let _guard = self.writes.lock().await;
        let key = TriggerKey::new(tenant, trigger);

        match self.store.delete(&key).await {
            Ok(()) => debug!(key = %key, "trigger deleted"),
            Err(TriggerStoreError::NotFound(missing)) => {
                return Err(TriggerCacheError::NotFound(missing));
            }
            Err(err) => return Err(err.into()),
        }
        self.refresh(None).await
    }

    /// Returns the reply of the first trigger in `tenant` that fires for
    /// `message`.
    ///
    /// Never touches the store.
    #[must_use]
    pub fn match_message(&self, tenant: TenantId, message: &str) -> Option<String> {
        self.snapshot()
            .tenant(tenant)?
            .find_match(message)
            .map(|reply| reply.content.clone())
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TriggerSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Cached triggers for `tenant`, if it has any.
    #[must_use]
    pub fn triggers(&self, tenant: TenantId) -> Option<Arc<TenantTriggers>> {
        self.snapshot().tenant(tenant).cloned()
    }

    /// Number of cached triggers for `tenant`.
    #[must_use]
    pub fn count(&self, tenant: TenantId) -> usize {
        self.snapshot().count(tenant)
    }

    /// Callers must hold `writes`.
    async fn refresh(&self, tenant: Option<TenantId>) -> TriggerCacheResult<()> {
        let next = match tenant {
            Some(tenant) => {
                let records = self.store.scan(TriggerFilter::tenant(tenant)).await?;
                let triggers: TenantTriggers = records
                    .into_iter()
                    .map(|record| (record.trigger().clone(), record.reply().clone()))
                    .collect();
                self.snapshot().with_tenant(tenant, triggers)
            }
            None => TriggerSnapshot::from_records(self.store.scan(TriggerFilter::all()).await?),
        };

        info!(
            scope = %tenant.map_or_else(|| "all".to_owned(), |tenant| tenant.to_string()),
            tenants = next.tenant_count(),
            "trigger cache rebuilt"
        );
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
        Ok(())
    }
}
