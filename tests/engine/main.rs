//! Integration tests for the parsing engine
//!
//! Tests for tokenizing, grammar construction, evaluation, memoization, and
//! tracing through the public API.

mod memoization;
mod scanning;
