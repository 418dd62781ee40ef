//! Invocation options as delivered by the chat platform.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Wire tag carried by every option.
///
/// Only [`OptionKind::SubcommandGroup`] is a group selector; every other
/// kind is a leaf value (or a leaf's value list, for
/// [`OptionKind::Subcommand`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OptionKind {
    /// Terminal subcommand; its children are the argument values.
    Subcommand,
    /// Group selector; carries exactly one child naming the next node.
    SubcommandGroup,
    /// String value.
    String,
    /// Integer value.
    Integer,
    /// Boolean value.
    Boolean,
    /// User identifier or payload.
    User,
    /// Channel identifier.
    Channel,
    /// Role identifier or payload.
    Role,
    /// User or role identifier.
    Mentionable,
    /// Floating point value.
    Number,
    /// Attachment identifier.
    Attachment,
}

/// Error returned when an option carries an unknown type tag.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unknown option type tag {0}")]
pub struct UnknownOptionKind(pub u8);

impl OptionKind {
    /// Returns the wire tag.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Subcommand => 1,
            Self::SubcommandGroup => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
            Self::Number => 10,
            Self::Attachment => 11,
        }
    }

    /// Returns `true` when the option asks the resolver to descend.
    #[must_use]
    pub const fn is_group_selector(self) -> bool {
        matches!(self, Self::SubcommandGroup)
    }
}

impl TryFrom<u8> for OptionKind {
    type Error = UnknownOptionKind;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::Subcommand),
            2 => Ok(Self::SubcommandGroup),
            3 => Ok(Self::String),
            4 => Ok(Self::Integer),
            5 => Ok(Self::Boolean),
            6 => Ok(Self::User),
            7 => Ok(Self::Channel),
            8 => Ok(Self::Role),
            9 => Ok(Self::Mentionable),
            10 => Ok(Self::Number),
            11 => Ok(Self::Attachment),
            other => Err(UnknownOptionKind(other)),
        }
    }
}

impl From<OptionKind> for u8 {
    fn from(kind: OptionKind) -> Self {
        kind.tag()
    }
}

/// A single option of an invocation request.
///
/// Produced fresh per invocation and consumed by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option or subcommand name.
    pub name: String,
    /// Wire type tag.
    #[serde(rename = "type")]
    pub kind: OptionKind,
    /// Raw value; `null` for selectors and subcommands.
    #[serde(default)]
    pub value: Value,
    /// Nested options, in the order the platform sent them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Self>,
}

impl CommandOption {
    /// Creates a group selector descending into `child`.
    #[must_use]
    pub fn group(name: impl Into<String>, child: Self) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::SubcommandGroup,
            value: Value::Null,
            options: vec![child],
        }
    }

    /// Creates a subcommand carrying its argument values.
    #[must_use]
    pub fn subcommand(name: impl Into<String>, values: impl IntoIterator<Item = Self>) -> Self {
        Self {
            name: name.into(),
            kind: OptionKind::Subcommand,
            value: Value::Null,
            options: values.into_iter().collect(),
        }
    }

    /// Creates a leaf value option.
    #[must_use]
    pub fn value(name: impl Into<String>, kind: OptionKind, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            options: Vec::new(),
        }
    }

    /// Returns the option the resolver descends into, if any.
    #[must_use]
    pub fn selected_child(&self) -> Option<&Self> {
        self.options.first()
    }
}
