//! Invocation context handed to preconditions and handlers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::tenant::TenantId;

/// Unique identifier for a single invocation, used to correlate log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Creates a new random invocation identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who issued an invocation and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoker {
    /// Tenant the invocation came from; `None` for direct messages.
    pub tenant: Option<TenantId>,
    /// Author snowflake.
    pub author_id: u64,
    /// Channel snowflake, when known.
    pub channel_id: Option<u64>,
}

impl Invoker {
    /// Creates an invoker inside `tenant`.
    #[must_use]
    pub const fn in_tenant(tenant: TenantId, author_id: u64) -> Self {
        Self {
            tenant: Some(tenant),
            author_id,
            channel_id: None,
        }
    }

    /// Creates an invoker from a direct message.
    #[must_use]
    pub const fn direct(author_id: u64) -> Self {
        Self {
            tenant: None,
            author_id,
            channel_id: None,
        }
    }

    /// Sets the channel the invocation was issued in.
    #[must_use]
    pub const fn with_channel(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }
}

/// Context built by the resolver once a leaf command has been located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationContext {
    invocation_id: InvocationId,
    invoker: Invoker,
    command_path: Vec<String>,
}

impl InvocationContext {
    /// Creates a context for the command at `command_path`.
    #[must_use]
    pub fn new(invoker: Invoker, command_path: Vec<String>) -> Self {
        Self {
            invocation_id: InvocationId::new(),
            invoker,
            command_path,
        }
    }

    /// Correlation identifier of this invocation.
    #[must_use]
    pub const fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    /// Who issued the invocation.
    #[must_use]
    pub const fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    /// Tenant of the invocation, if any.
    #[must_use]
    pub const fn tenant(&self) -> Option<TenantId> {
        self.invoker.tenant
    }

    /// Names from the root node down to the resolved leaf.
    #[must_use]
    pub fn command_path(&self) -> &[String] {
        &self.command_path
    }

    /// Space-separated qualified command name, e.g. `command set`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.command_path.join(" ")
    }
}
