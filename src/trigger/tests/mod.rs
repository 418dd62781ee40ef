//! Unit tests for the trigger module.

mod auto_reply_tests;
mod support;
