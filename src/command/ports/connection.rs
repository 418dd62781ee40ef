//! Ambient connection state used while coercing entity arguments.

use serde_json::Value;

use crate::command::domain::{Channel, EntityError, Member, Role, User};
use crate::tenant::TenantId;

/// Read access to the platform state the bot is connected to.
///
/// Users, members, and roles arrive as full payloads and are built from
/// them; channels arrive as bare identifiers and must be looked up.
pub trait ConnectionState: Send + Sync {
    /// Builds a user from its payload.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] when the payload is malformed.
    fn user(&self, payload: Value) -> Result<User, EntityError> {
        User::from_payload(payload)
    }

    /// Builds a member of `tenant` from its payload.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] when the payload is malformed.
    fn member(&self, tenant: TenantId, payload: Value) -> Result<Member, EntityError> {
        Member::from_payload(tenant, payload)
    }

    /// Builds a role of `tenant` from its payload.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] when the payload is malformed.
    fn role(&self, tenant: TenantId, payload: Value) -> Result<Role, EntityError> {
        Role::from_payload(tenant, payload)
    }

    /// Looks up a channel or thread of `tenant`.
    ///
    /// Returns `None` when the channel is not known.
    fn channel(&self, tenant: TenantId, channel_id: u64) -> Option<Channel>;
}
