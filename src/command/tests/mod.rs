//! Unit tests for command resolution and argument binding.

mod support;
