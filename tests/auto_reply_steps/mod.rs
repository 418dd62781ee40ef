//! Step definitions for auto-reply behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
