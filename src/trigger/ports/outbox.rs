//! Outbound replies produced by the auto-reply commands.

use async_trait::async_trait;

use crate::command::domain::InvocationContext;
use crate::trigger::domain::TriggerListing;

/// Outcome reported back to whoever ran an auto-reply command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoReplyNotice {
    /// The trigger was stored.
    Saved {
        /// Stored trigger.
        trigger: String,
    },
    /// The trigger was removed.
    Deleted {
        /// Removed trigger.
        trigger: String,
    },
    /// The tenant's triggers in insertion order.
    Listing(Vec<TriggerListing>),
    /// The tenant has no triggers.
    NothingRegistered,
    /// The tenant already holds the maximum number of triggers.
    CapacityExceeded {
        /// Per-tenant limit.
        limit: usize,
    },
    /// The trigger to remove does not exist.
    NotFound {
        /// Requested trigger.
        trigger: String,
    },
}

/// Delivers [`AutoReplyNotice`]s to the invoking user.
#[async_trait]
pub trait AutoReplyOutbox: Send + Sync {
    /// Sends `notice` in reply to the invocation described by `context`.
    async fn send(&self, context: &InvocationContext, notice: AutoReplyNotice);
}
