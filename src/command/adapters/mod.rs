//! Adapters for the command subsystem ports.
//!
//! - [`memory`]: in-memory connection state and a recording error channel
//!   for tests
//! - [`channel`]: error channels backed by a `tokio` queue or by logging

pub mod channel;
pub mod memory;
