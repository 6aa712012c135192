//! Tests for template engine
//!
//! Organized into focused submodules: tokenizer, parsing, rendering, errors and
//! the hello-world test fragment scenarios.

use super::*;

// Test helper functions
mod helpers;

mod tokenstream_performance;


// Error and edge case tests
mod errors;
