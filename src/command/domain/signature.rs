//! Registration-time parameter schemas for command handlers.

use std::fmt;
use std::sync::Arc;

use super::{Converter, EntityKind};

/// Declared type of a handler parameter.
#[derive(Clone)]
pub enum DeclaredType {
    /// Plain value passed through as sent.
    Raw,
    /// Built-in domain entity constructed from the raw payload.
    Entity(EntityKind),
    /// Named semantic type resolved through the coercion registry.
    Semantic(String),
    /// Inline converter invoked with the raw value.
    Converter(Arc<dyn Converter>),
    /// Option metadata wrapping the underlying type.
    Described {
        /// Human-readable description shown by the platform.
        description: String,
        /// Underlying declared type.
        inner: Box<Self>,
    },
}

impl DeclaredType {
    /// Wraps `inner` with option metadata.
    #[must_use]
    pub fn described(description: impl Into<String>, inner: Self) -> Self {
        Self::Described {
            description: description.into(),
            inner: Box::new(inner),
        }
    }

    /// Creates a semantic type reference.
    #[must_use]
    pub fn semantic(name: impl Into<String>) -> Self {
        Self::Semantic(name.into())
    }

    /// Strips metadata wrappers down to the type coercion acts on.
    #[must_use]
    pub fn effective(&self) -> &Self {
        let mut current = self;
        while let Self::Described { inner, .. } = current {
            current = inner.as_ref();
        }
        current
    }
}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => f.write_str("Raw"),
            Self::Entity(kind) => f.debug_tuple("Entity").field(kind).finish(),
            Self::Semantic(name) => f.debug_tuple("Semantic").field(name).finish(),
            Self::Converter(_) => f.write_str("Converter(..)"),
            Self::Described { description, inner } => f
                .debug_struct("Described")
                .field("description", description)
                .field("inner", inner)
                .finish(),
        }
    }
}

/// A declared handler parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Keyword the bound value is passed under.
    pub name: String,
    /// Declared type driving coercion.
    pub declared_type: DeclaredType,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
        }
    }

    /// Creates a parameter whose value is passed through unchanged.
    #[must_use]
    pub fn raw(name: impl Into<String>) -> Self {
        Self::new(name, DeclaredType::Raw)
    }
}

/// Parameter list of a handler, including its implicit context prefix.
///
/// The first `implicit_prefix` parameters stand for values the resolver
/// supplies itself (the owning handler and the invocation context); they
/// are never matched against options.
#[derive(Debug, Clone, Default)]
pub struct HandlerSignature {
    parameters: Vec<Parameter>,
    implicit_prefix: usize,
}

impl HandlerSignature {
    /// Creates an empty signature with no implicit prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: Vec::new(),
            implicit_prefix: 0,
        }
    }

    /// Appends an implicit context parameter.
    ///
    /// Implicit parameters always stay ahead of option-bound parameters.
    #[must_use]
    pub fn with_implicit(mut self, name: impl Into<String>) -> Self {
        self.parameters
            .insert(self.implicit_prefix, Parameter::raw(name));
        self.implicit_prefix += 1;
        self
    }

    /// Appends an option-bound parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Number of leading parameters supplied by the resolver.
    #[must_use]
    pub const fn implicit_prefix(&self) -> usize {
        self.implicit_prefix
    }

    /// Full declared parameter list, implicit prefix included.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Parameters matched positionally against options.
    pub fn bindable(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().skip(self.implicit_prefix)
    }
}
