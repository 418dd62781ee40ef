//! Command resolution and argument binding.
//!
//! An invocation arrives as a nested option list. The resolver walks the
//! registered command tree along its group selectors, builds the invocation
//! context, runs the precondition gate, coerces each option value into the
//! type its parameter declares, and invokes the leaf handler.
//!
//! # Architecture
//!
//! - **Domain**: command tree, options, signatures, entities ([`domain`])
//! - **Ports**: connection state, error channel, precondition ([`ports`])
//! - **Services**: coercion registry, resolver, cooldown gate ([`services`])
//! - **Adapters**: in-memory and queue-backed port implementations
//!   ([`adapters`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use cogwheel::command::{
//!     adapters::memory::{InMemoryConnectionState, RecordingErrorChannel},
//!     domain::{
//!         BoundArguments, CommandHandler, CommandOption, CommandNode, HandlerError,
//!         HandlerSignature, InvocationContext, Invoker, LeafCommand, OptionKind, Parameter,
//!     },
//!     ports::AllowAll,
//!     services::{CoercionRegistry, CommandResolver, DispatchOutcome},
//! };
//!
//! struct Ping;
//!
//! #[async_trait]
//! impl CommandHandler for Ping {
//!     async fn invoke(
//!         &self,
//!         _context: &InvocationContext,
//!         arguments: BoundArguments,
//!     ) -> Result<(), HandlerError> {
//!         assert_eq!(arguments.str("target"), Some("pong"));
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let signature = HandlerSignature::new()
//!     .with_implicit("ctx")
//!     .with_parameter(Parameter::raw("target"));
//! let root = CommandNode::Leaf(
//!     LeafCommand::new("ping", signature, Arc::new(Ping)).expect("valid leaf"),
//! );
//! let resolver = CommandResolver::new(
//!     Arc::new(CoercionRegistry::new()),
//!     Arc::new(InMemoryConnectionState::new()),
//!     Arc::new(RecordingErrorChannel::new()),
//! );
//!
//! let invocation = CommandOption::subcommand(
//!     "ping",
//!     [CommandOption::value("target", OptionKind::String, "pong")],
//! );
//! let outcome = resolver
//!     .resolve_and_invoke(&root, &invocation, Invoker::direct(7), &AllowAll)
//!     .await
//!     .expect("dispatch succeeds");
//! assert!(matches!(outcome, DispatchOutcome::Invoked(_)));
//! # });
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
