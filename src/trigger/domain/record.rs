//! Trigger records and the values they are built from.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TriggerDomainError;
use crate::tenant::TenantId;

/// Text a message is matched against.
///
/// Stored verbatim: surrounding whitespace is significant for exact
/// matches, but blank triggers are rejected because they would match
/// almost every message as substrings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerText(String);

impl TriggerText {
    /// Creates validated trigger text.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerDomainError::EmptyTrigger`] when the text is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TriggerDomainError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(TriggerDomainError::EmptyTrigger);
        }
        Ok(Self(text))
    }

    /// Returns the trigger as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when this trigger fires for `message`.
    ///
    /// Exact equality always fires; partial triggers also fire when they
    /// occur anywhere in the message.
    #[must_use]
    pub fn fires_for(&self, message: &str, partial: bool) -> bool {
        message == self.0 || (partial && message.contains(self.0.as_str()))
    }
}

impl TryFrom<String> for TriggerText {
    type Error = TriggerDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TriggerText> for String {
    fn from(value: TriggerText) -> Self {
        value.0
    }
}

impl AsRef<str> for TriggerText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TriggerText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reply sent when a trigger fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReply {
    /// Reply text.
    pub content: String,
    /// Whether substring containment also fires the trigger.
    pub partial: bool,
}

impl TriggerReply {
    /// Creates a validated reply.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerDomainError::EmptyContent`] when `content` is blank.
    pub fn new(content: impl Into<String>, partial: bool) -> Result<Self, TriggerDomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(TriggerDomainError::EmptyContent);
        }
        Ok(Self { content, partial })
    }
}

/// Primary key of a trigger record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerKey {
    /// Owning tenant.
    pub tenant: TenantId,
    /// Trigger text.
    pub trigger: TriggerText,
}

impl TriggerKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(tenant: TenantId, trigger: TriggerText) -> Self {
        Self { tenant, trigger }
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant, self.trigger)
    }
}

/// A persisted trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRecord {
    key: TriggerKey,
    reply: TriggerReply,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field bundle for reconstructing a record from storage.
#[derive(Debug, Clone)]
pub struct PersistedTriggerData {
    /// Primary key.
    pub key: TriggerKey,
    /// Reply.
    pub reply: TriggerReply,
    /// Creation timestamp; orders records within a tenant.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TriggerRecord {
    /// Creates a new record stamped with the current time.
    #[must_use]
    pub fn new(key: TriggerKey, reply: TriggerReply, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            key,
            reply,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a record from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedTriggerData) -> Self {
        Self {
            key: data.key,
            reply: data.reply,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Primary key.
    #[must_use]
    pub const fn key(&self) -> &TriggerKey {
        &self.key
    }

    /// Owning tenant.
    #[must_use]
    pub const fn tenant(&self) -> TenantId {
        self.key.tenant
    }

    /// Trigger text.
    #[must_use]
    pub const fn trigger(&self) -> &TriggerText {
        &self.key.trigger
    }

    /// Reply content and match mode.
    #[must_use]
    pub const fn reply(&self) -> &TriggerReply {
        &self.reply
    }

    /// Creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Selects which records a scan returns.
///
/// The empty filter selects every tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerFilter {
    /// Restrict to one tenant.
    pub tenant: Option<TenantId>,
}

impl TriggerFilter {
    /// Filter selecting all records.
    #[must_use]
    pub const fn all() -> Self {
        Self { tenant: None }
    }

    /// Filter selecting one tenant's records.
    #[must_use]
    pub const fn tenant(tenant: TenantId) -> Self {
        Self {
            tenant: Some(tenant),
        }
    }

    /// Returns `true` when `record` is selected.
    #[must_use]
    pub fn matches(&self, record: &TriggerRecord) -> bool {
        self.tenant.is_none_or(|tenant| tenant == record.tenant())
    }
}

/// One row of a tenant's trigger listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerListing {
    /// Trigger text.
    pub trigger: String,
    /// Reply content.
    pub content: String,
    /// Whether the trigger matches partially.
    pub partial: bool,
}
