//! Error types for command registration, routing, coercion, and dispatch.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::EntityKind;

/// Errors raised while assembling a command tree at registration time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandTreeError {
    /// A node name was empty after trimming.
    #[error("command names must not be empty")]
    EmptyName,

    /// Two children of the same group share a name.
    #[error("group '{group}' already has a child named '{name}'")]
    DuplicateSibling {
        /// Group holding the duplicate.
        group: String,
        /// Duplicated child name.
        name: String,
    },
}

/// The requested subcommand path does not exist in the command tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No child of `group` is named `name`.
    #[error("unknown subcommand '{name}' in group '{group}'")]
    UnknownSubcommand {
        /// Group that was searched.
        group: String,
        /// Requested child name.
        name: String,
    },

    /// A group selector carried no child option.
    #[error("group selector '{0}' did not name a subcommand")]
    EmptyGroupSelector(String),

    /// A group selector targeted a leaf command.
    #[error("'{0}' is a command, not a group")]
    NotAGroup(String),

    /// The options ended on a group instead of a leaf command.
    #[error("'{0}' is a group and needs a subcommand")]
    NotALeaf(String),
}

/// Errors raised while building an entity from a raw payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityError {
    /// The payload could not be read as the requested entity.
    #[error("invalid {kind} payload: {reason}")]
    InvalidPayload {
        /// Entity kind being built.
        kind: EntityKind,
        /// Parse failure reason.
        reason: String,
    },

    /// A tenant-scoped entity was requested outside a tenant.
    #[error("{0} arguments are only available inside a tenant")]
    MissingTenant(EntityKind),
}

impl EntityError {
    pub(crate) fn invalid(kind: EntityKind, reason: &impl fmt::Display) -> Self {
        Self::InvalidPayload {
            kind,
            reason: reason.to_string(),
        }
    }
}

/// A converter rejected its raw input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ConversionError(pub String);

impl ConversionError {
    /// Creates a conversion error from any displayable reason.
    pub fn new(reason: impl fmt::Display) -> Self {
        Self(reason.to_string())
    }
}

/// Errors raised while coercing one option into its declared type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoercionError {
    /// Entity construction failed.
    #[error("cannot bind parameter '{parameter}': {source}")]
    Entity {
        /// Parameter being bound.
        parameter: String,
        /// Underlying failure.
        #[source]
        source: EntityError,
    },

    /// A converter failed.
    #[error("cannot convert parameter '{parameter}': {source}")]
    Conversion {
        /// Parameter being bound.
        parameter: String,
        /// Underlying failure.
        #[source]
        source: ConversionError,
    },
}

/// Failure reported by a command handler.
#[derive(Debug, Clone, Error)]
#[error("command handler failed: {0}")]
pub struct HandlerError(Arc<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    /// Wraps an arbitrary handler failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Returns the wrapped failure.
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }
}

/// Errors surfaced to the caller of the resolver.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The subcommand path does not exist.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// An option could not be coerced.
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// The handler ran and failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
