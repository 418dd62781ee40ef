//! Port trait definitions for the command subsystem.
//!
//! The resolver depends on three collaborators it does not own: the
//! connection state used to build entities, the error channel that formats
//! and sends failure replies, and the precondition gate run before every
//! handler.

pub mod connection;
pub mod error_channel;
pub mod precondition;

pub use connection::ConnectionState;
pub use error_channel::{CommandErrorChannel, CommandErrorEvent};
pub use precondition::{AllowAll, Precondition};
