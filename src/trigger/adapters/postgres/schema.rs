//! Diesel schema for trigger persistence.

diesel::table! {
    /// Auto-reply trigger records, one per tenant and trigger text.
    trigger_records (tenant_id, trigger) {
        /// Owning tenant snowflake.
        tenant_id -> Int8,
        /// Trigger text, stored verbatim.
        trigger -> Text,
        /// Reply content.
        content -> Text,
        /// Whether substring containment fires the trigger.
        partial -> Bool,
        /// Creation timestamp; orders records within a tenant.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
