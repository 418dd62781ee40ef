//! Error-event channel port.
//!
//! Failures that must become user-visible replies, rather than control-flow
//! errors, are dispatched here as events.

use async_trait::async_trait;
use serde::Serialize;

use crate::command::domain::InvocationContext;

/// Event describing a failure the chat layer should report to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CommandErrorEvent {
    /// The precondition gate rejected the invocation.
    PreconditionFailed {
        /// Context of the rejected invocation.
        context: InvocationContext,
        /// Human-readable reason.
        reason: String,
    },
}

impl CommandErrorEvent {
    /// Context of the failed invocation.
    #[must_use]
    pub const fn context(&self) -> &InvocationContext {
        match self {
            Self::PreconditionFailed { context, .. } => context,
        }
    }

    /// Human-readable reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::PreconditionFailed { reason, .. } => reason,
        }
    }
}

/// Receives command error events.
///
/// Dispatch is fire-and-forget: implementations log delivery problems
/// instead of returning them.
#[async_trait]
pub trait CommandErrorChannel: Send + Sync {
    /// Publishes `event`.
    async fn dispatch(&self, event: CommandErrorEvent);
}
