//! `PostgreSQL` adapter for trigger persistence.

mod models;
mod schema;
mod store;

pub use store::{PostgresTriggerStore, TriggerPgPool};
