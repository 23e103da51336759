//! Integration tests for the foundation layer
//!
//! Tests for error construction and display, and rule-name interning.

mod errors;
mod interning;
