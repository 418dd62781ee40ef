//! Command tree: groups of subcommands ending in invocable leaves.

use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::{BoundArguments, CommandTreeError, HandlerError, HandlerSignature, InvocationContext};

/// Callable behind a leaf command.
///
/// The handler value itself plays the role of the owning instance; the
/// context is the second implicit argument and `arguments` carries the
/// coerced option values keyed by parameter name.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the command fails.
    async fn invoke(
        &self,
        context: &InvocationContext,
        arguments: BoundArguments,
    ) -> Result<(), HandlerError>;
}

/// A terminal, invocable command.
#[derive(Clone)]
pub struct LeafCommand {
    name: String,
    signature: HandlerSignature,
    handler: Arc<dyn CommandHandler>,
}

impl LeafCommand {
    /// Creates a leaf command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandTreeError::EmptyName`] when `name` is blank.
    pub fn new(
        name: impl Into<String>,
        signature: HandlerSignature,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Self, CommandTreeError> {
        Ok(Self {
            name: validated_name(name.into())?,
            signature,
            handler,
        })
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter schema.
    #[must_use]
    pub const fn signature(&self) -> &HandlerSignature {
        &self.signature
    }

    /// Handler invoked once arguments are bound.
    #[must_use]
    pub fn handler(&self) -> &dyn CommandHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for LeafCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafCommand")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A named group of subcommands.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    name: String,
    children: Vec<CommandNode>,
}

impl CommandGroup {
    /// Creates a group, checking that sibling names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`CommandTreeError::EmptyName`] when `name` is blank, or
    /// [`CommandTreeError::DuplicateSibling`] when two children share a name.
    pub fn new(
        name: impl Into<String>,
        children: impl IntoIterator<Item = CommandNode>,
    ) -> Result<Self, CommandTreeError> {
        let name = validated_name(name.into())?;
        let children: Vec<CommandNode> = children.into_iter().collect();

        let mut seen = HashSet::new();
        for child in &children {
            if !seen.insert(child.name()) {
                return Err(CommandTreeError::DuplicateSibling {
                    group: name,
                    name: child.name().to_owned(),
                });
            }
        }

        Ok(Self { name, children })
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in registration order.
    #[must_use]
    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Finds the child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|child| child.name() == name)
    }
}

/// A node of the command tree.
#[derive(Debug, Clone)]
pub enum CommandNode {
    /// Group whose children are further nodes.
    Group(CommandGroup),
    /// Invocable command.
    Leaf(LeafCommand),
}

impl CommandNode {
    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Group(group) => group.name(),
            Self::Leaf(leaf) => leaf.name(),
        }
    }
}

impl From<CommandGroup> for CommandNode {
    fn from(group: CommandGroup) -> Self {
        Self::Group(group)
    }
}

impl From<LeafCommand> for CommandNode {
    fn from(leaf: LeafCommand) -> Self {
        Self::Leaf(leaf)
    }
}

fn validated_name(name: String) -> Result<String, CommandTreeError> {
    if name.trim().is_empty() {
        return Err(CommandTreeError::EmptyName);
    }
    Ok(name)
}
