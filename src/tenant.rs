//! Tenant identifier shared by the command and trigger contexts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use thiserror::Error;

/// Isolated scope (one guild or community) owning its own trigger set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TenantId(NonZeroU64);

/// Error returned when a raw tenant identifier is zero.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("tenant identifier must be non-zero")]
pub struct InvalidTenantId;

impl TenantId {
    /// Creates a tenant identifier from a raw snowflake.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTenantId`] when `raw` is zero.
    pub const fn new(raw: u64) -> Result<Self, InvalidTenantId> {
        match NonZeroU64::new(raw) {
            Some(value) => Ok(Self(value)),
            None => Err(InvalidTenantId),
        }
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for TenantId {
    type Error = InvalidTenantId;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TenantId> for u64 {
    fn from(value: TenantId) -> Self {
        value.get()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidTenantId, TenantId};

    #[test]
    fn zero_is_rejected() {
        assert_eq!(TenantId::new(0), Err(InvalidTenantId));
    }

    #[test]
    fn deserializes_from_plain_integer() {
        let tenant: TenantId = serde_json::from_str("42").expect("tenant should parse");
        assert_eq!(tenant.get(), 42);
    }

    #[test]
    fn deserialization_rejects_zero() {
        assert!(serde_json::from_str::<TenantId>("0").is_err());
    }
}
