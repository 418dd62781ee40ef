//! Per-tenant auto-reply triggers.
//!
//! Tenants register trigger texts with a reply. Every inbound message is
//! matched against the tenant's triggers in insertion order and the first
//! one that fires supplies the reply. The store is the source of truth; the
//! [`services::TriggerCache`] serves matches from an immutable snapshot that
//! is rebuilt after every write.
//!
//! # Architecture
//!
//! - **Domain**: trigger text, replies, records, snapshots ([`domain`])
//! - **Ports**: trigger store and command outbox ([`ports`])
//! - **Adapters**: in-memory and `PostgreSQL` stores ([`adapters`])
//! - **Services**: cache, auto-reply service, management commands
//!   ([`services`])

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
