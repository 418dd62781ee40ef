//! Domain model for command resolution and argument binding.
//!
//! Commands form an immutable tree built at registration time. Each
//! invocation arrives as a nested [`CommandOption`] whose group selectors
//! name the path down to a [`LeafCommand`]; the leaf's
//! [`HandlerSignature`] declares how the remaining option values are bound.

mod context;
mod converter;
mod entity;
mod error;
mod option;
mod signature;
mod tree;

pub use context::{InvocationContext, InvocationId, Invoker};
pub use converter::{AsyncConverter, Converter, SyncConverter};
pub use entity::{
    BoundArguments, BoundValue, Channel, ChannelKind, Entity, EntityKind, Member, Role, User,
    channel_id,
};
pub use error::{
    CoercionError, CommandTreeError, ConversionError, EntityError, HandlerError, ResolveError,
    RoutingError,
};
pub use option::{CommandOption, OptionKind, UnknownOptionKind};
pub use signature::{DeclaredType, HandlerSignature, Parameter};
pub use tree::{CommandGroup, CommandHandler, CommandNode, LeafCommand};
