//! Port contracts for trigger persistence and command replies.

mod outbox;
mod store;

pub use outbox::{AutoReplyNotice, AutoReplyOutbox};
pub use store::{TriggerStore, TriggerStoreError, TriggerStoreResult};

#[cfg(test)]
pub(crate) use store::MockTriggerStore;
