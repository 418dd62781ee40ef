//! Adapters for the trigger ports.
//!
//! - [`memory::InMemoryTriggerStore`]: thread-safe store for tests and
//!   single-process deployments
//! - [`memory::RecordingOutbox`]: outbox that keeps every notice
//! - [`postgres::PostgresTriggerStore`]: `PostgreSQL` persistence via Diesel

pub mod memory;
pub mod postgres;
