//! `PostgreSQL` trigger store.

use super::{
    models::{NewTriggerRecordRow, TriggerRecordRow},
    schema::trigger_records,
};
use crate::tenant::TenantId;
use crate::trigger::{
    domain::{
        PersistedTriggerData, TriggerFilter, TriggerKey, TriggerRecord, TriggerReply, TriggerText,
    },
    ports::{TriggerStore, TriggerStoreError, TriggerStoreResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// `PostgreSQL` connection pool type used by the trigger store.
pub type TriggerPgPool = Pool<ConnectionManager<PgConnection>>;

const CREATE_TRIGGER_RECORDS: &str =
    include_str!("../../../../migrations/2026-10-18-000000_create_trigger_records/up.sql");

/// `PostgreSQL`-backed trigger store.
///
/// Scans order by creation time, then trigger text, so a tenant's triggers
/// come back in the order they were first stored.
#[derive(Debug, Clone)]
pub struct PostgresTriggerStore {
    pool: TriggerPgPool,
}

impl PostgresTriggerStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TriggerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TriggerStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TriggerStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TriggerStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TriggerStoreError::persistence)?
    }
}

#[async_trait]
impl TriggerStore for PostgresTriggerStore {
    async fn ensure_schema(&self) -> TriggerStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TRIGGER_RECORDS)
                .map_err(TriggerStoreError::persistence)?;
            debug!("trigger_records schema ensured");
            Ok(())
        })
        .await
    }

    async fn exists(&self, key: &TriggerKey) -> TriggerStoreResult<bool> {
        let tenant = tenant_column(key.tenant)?;
        let trigger = key.trigger.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                trigger_records::table.find((tenant, trigger)),
            ))
            .get_result::<bool>(connection)
            .map_err(TriggerStoreError::persistence)
        })
        .await
    }

    async fn insert(&self, record: &TriggerRecord) -> TriggerStoreResult<()> {
        let key = record.key().clone();
        let new_row = to_new_row(record)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(trigger_records::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TriggerStoreError::Duplicate(key.clone())
                    }
                    _ => TriggerStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, record: &TriggerRecord) -> TriggerStoreResult<()> {
        let key = record.key().clone();
        let tenant = tenant_column(key.tenant)?;
        let trigger = key.trigger.as_str().to_owned();
        let content_val = record.reply().content.clone();
        let partial_val = record.reply().partial;
        let updated_val = record.updated_at();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(trigger_records::table.find((tenant, trigger)))
                .set((
                    trigger_records::content.eq(&content_val),
                    trigger_records::partial.eq(partial_val),
                    trigger_records::updated_at.eq(updated_val),
                ))
                .execute(connection)
                .map_err(TriggerStoreError::persistence)?;

            if updated_count == 0 {
                return Err(TriggerStoreError::NotFound(key));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, key: &TriggerKey) -> TriggerStoreResult<()> {
        let key = key.clone();
        let tenant = tenant_column(key.tenant)?;
        let trigger = key.trigger.as_str().to_owned();

        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(trigger_records::table.find((tenant, trigger)))
                .execute(connection)
                .map_err(TriggerStoreError::persistence)?;

            if deleted_count == 0 {
                return Err(TriggerStoreError::NotFound(key));
            }
            Ok(())
        })
        .await
    }

    async fn scan(&self, filter: TriggerFilter) -> TriggerStoreResult<Vec<TriggerRecord>> {
        let tenant = filter.tenant.map(tenant_column).transpose()?;

        self.run_blocking(move |connection| {
            let mut query = trigger_records::table
                .select(TriggerRecordRow::as_select())
                .order((
                    trigger_records::created_at.asc(),
                    trigger_records::trigger.asc(),
                ))
                .into_boxed();
            if let Some(tenant_id) = tenant {
                query = query.filter(trigger_records::tenant_id.eq(tenant_id));
            }
            let rows = query
                .load::<TriggerRecordRow>(connection)
                .map_err(TriggerStoreError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }
}

fn tenant_column(tenant: TenantId) -> TriggerStoreResult<i64> {
    i64::try_from(tenant.get()).map_err(TriggerStoreError::invalid_persisted_data)
}

fn to_new_row(record: &TriggerRecord) -> TriggerStoreResult<NewTriggerRecordRow> {
    Ok(NewTriggerRecordRow {
        tenant_id: tenant_column(record.tenant())?,
        trigger: record.trigger().as_str().to_owned(),
        content: record.reply().content.clone(),
        partial: record.reply().partial,
        created_at: record.created_at(),
        updated_at: record.updated_at(),
    })
}

fn row_to_record(row: TriggerRecordRow) -> TriggerStoreResult<TriggerRecord> {
    let TriggerRecordRow {
        tenant_id,
        trigger,
        content,
        partial,
        created_at,
        updated_at,
    } = row;

    let raw_tenant = u64::try_from(tenant_id).map_err(TriggerStoreError::invalid_persisted_data)?;
    let tenant = TenantId::new(raw_tenant).map_err(TriggerStoreError::invalid_persisted_data)?;
    let trigger = TriggerText::new(trigger).map_err(TriggerStoreError::invalid_persisted_data)?;
    let reply =
        TriggerReply::new(content, partial).map_err(TriggerStoreError::invalid_persisted_data)?;

    Ok(TriggerRecord::from_persisted(PersistedTriggerData {
        key: TriggerKey::new(tenant, trigger),
        reply,
        created_at,
        updated_at,
    }))
}
