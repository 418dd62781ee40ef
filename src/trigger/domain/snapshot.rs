//! Immutable, per-tenant views of the trigger table.

use std::collections::HashMap;
use std::sync::Arc;

use super::{TriggerListing, TriggerRecord, TriggerReply, TriggerText};
use crate::tenant::TenantId;

/// One tenant's triggers in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantTriggers {
    entries: Vec<(TriggerText, TriggerReply)>,
}

impl TenantTriggers {
    /// Returns the reply of the first trigger that fires for `message`.
    ///
    /// Triggers are tried in insertion order; the first hit wins even when
    /// a later trigger would match more precisely.
    #[must_use]
    pub fn find_match(&self, message: &str) -> Option<&TriggerReply> {
        self.entries
            .iter()
            .find(|(trigger, reply)| trigger.fires_for(message, reply.partial))
            .map(|(_, reply)| reply)
    }

    /// Returns `true` when `trigger` is registered.
    #[must_use]
    pub fn contains(&self, trigger: &TriggerText) -> bool {
        self.entries.iter().any(|(existing, _)| existing == trigger)
    }

    /// Number of registered triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no triggers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over triggers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TriggerText, &TriggerReply)> {
        self.entries.iter().map(|(trigger, reply)| (trigger, reply))
    }

    /// Renders the triggers as listing rows.
    #[must_use]
    pub fn listing(&self) -> Vec<TriggerListing> {
        self.iter()
            .map(|(trigger, reply)| TriggerListing {
                trigger: trigger.to_string(),
                content: reply.content.clone(),
                partial: reply.partial,
            })
            .collect()
    }

    fn push(&mut self, trigger: TriggerText, reply: TriggerReply) {
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == trigger) {
            slot.1 = reply;
        } else {
            self.entries.push((trigger, reply));
        }
    }
}

impl FromIterator<(TriggerText, TriggerReply)> for TenantTriggers {
    fn from_iter<I: IntoIterator<Item = (TriggerText, TriggerReply)>>(iter: I) -> Self {
        let mut triggers = Self::default();
        for (trigger, reply) in iter {
            triggers.push(trigger, reply);
        }
        triggers
    }
}

/// Point-in-time copy of every tenant's triggers.
///
/// Snapshots are never mutated after construction; the cache replaces the
/// whole snapshot instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerSnapshot {
    tenants: HashMap<TenantId, Arc<TenantTriggers>>,
}

impl TriggerSnapshot {
    /// Groups scanned records by tenant, keeping scan order within a tenant.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = TriggerRecord>) -> Self {
        let mut grouped: HashMap<TenantId, TenantTriggers> = HashMap::new();
        for record in records {
            let tenant = record.tenant();
            grouped
                .entry(tenant)
                .or_default()
                .push(record.trigger().clone(), record.reply().clone());
        }
        Self {
            tenants: grouped
                .into_iter()
                .map(|(tenant, triggers)| (tenant, Arc::new(triggers)))
                .collect(),
        }
    }

    /// Returns a copy with `tenant`'s entry replaced.
    ///
    /// An empty replacement drops the tenant.
    #[must_use]
    pub fn with_tenant(&self, tenant: TenantId, triggers: TenantTriggers) -> Self {
        let mut tenants = self.tenants.clone();
        if triggers.is_empty() {
            tenants.remove(&tenant);
        } else {
            tenants.insert(tenant, Arc::new(triggers));
        }
        Self { tenants }
    }

    /// Triggers registered for `tenant`.
    #[must_use]
    pub fn tenant(&self, tenant: TenantId) -> Option<&Arc<TenantTriggers>> {
        self.tenants.get(&tenant)
    }

    /// Number of triggers registered for `tenant`.
    #[must_use]
    pub fn count(&self, tenant: TenantId) -> usize {
        self.tenant(tenant).map_or(0, |triggers| triggers.len())
    }

    /// Number of tenants with at least one trigger.
    #[must_use]
    pub fn tenant_count(&self) -> usize {
        self.tenants.len()
    }
}
