//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `dispatch_tests`: Routing, gating, and error events through the public API
//! - `auto_reply_tests`: Trigger management commands wired to live replies

mod in_memory {
    pub mod helpers;

    mod auto_reply_tests;
    mod dispatch_tests;
}
