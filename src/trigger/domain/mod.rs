//! Domain model for auto-reply triggers.

mod error;
mod record;
mod snapshot;

pub use error::TriggerDomainError;
pub use record::{
    PersistedTriggerData, TriggerFilter, TriggerKey, TriggerListing, TriggerRecord, TriggerReply,
    TriggerText,
};
pub use snapshot::{TenantTriggers, TriggerSnapshot};
