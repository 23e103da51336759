//! Packrat - Parser combinators with packrat memoization
//!
//! This crate re-exports all layers of the Packrat system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: packrat_runtime    - REPL, CLI, tree dumps
//! Layer 2: packrat_grammars   - Calc, s-expression, and query grammars; tree and SQL output
//! Layer 1: packrat_engine     - Tokenizer, combinators, rules, memoization, tracing
//! Layer 0: packrat_foundation - Errors and rule-name interning
//! ```

pub use packrat_engine as engine;
pub use packrat_foundation as foundation;
pub use packrat_grammars as grammars;
pub use packrat_runtime as runtime;
