//! In-memory trigger adapters.

mod outbox;
mod store;

pub use outbox::RecordingOutbox;
pub use store::InMemoryTriggerStore;
