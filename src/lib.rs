//! Cogwheel: command dispatch and auto-replies for chat bots.
//!
//! This crate provides two independent subsystems a bot plugs into its
//! gateway loop:
//!
//! - [`command`]: resolves nested slash-command invocations to a handler,
//!   coerces option values into typed arguments, and gates each invocation
//!   behind a precondition.
//! - [`trigger`]: keeps a per-tenant cache of auto-reply triggers backed by a
//!   persistent store and answers messages that fire them.
//!
//! # Architecture
//!
//! Both subsystems follow hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, `PostgreSQL`)
//! - **Services**: Orchestration over ports

pub mod command;
pub mod tenant;
pub mod trigger;
