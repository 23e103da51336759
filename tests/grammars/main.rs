//! Integration tests for the bundled grammars
//!
//! Tests the calc, s-expression, and query grammars through their public
//! parse functions, plus tree and SQL rendering.

mod calc;
mod languages;
mod query;
mod rendering;
mod sexp;
