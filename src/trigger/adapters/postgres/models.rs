//! Diesel row models for trigger persistence.

use super::schema::trigger_records;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for trigger records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = trigger_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TriggerRecordRow {
    /// Owning tenant snowflake.
    pub tenant_id: i64,
    /// Trigger text.
    pub trigger: String,
    /// Reply content.
    pub content: String,
    /// Partial match flag.
    pub partial: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for trigger records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trigger_records)]
pub struct NewTriggerRecordRow {
    /// Owning tenant snowflake.
    pub tenant_id: i64,
    /// Trigger text.
    pub trigger: String,
    /// Reply content.
    pub content: String,
    /// Partial match flag.
    pub partial: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
