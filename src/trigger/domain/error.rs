//! Error types for trigger domain validation.

use thiserror::Error;

/// Errors returned while constructing trigger domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TriggerDomainError {
    /// The trigger text is empty or only whitespace.
    #[error("trigger text must not be empty")]
    EmptyTrigger,

    /// The reply content is empty or only whitespace.
    #[error("reply content must not be empty")]
    EmptyContent,
}
