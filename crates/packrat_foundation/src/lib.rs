//! Core types shared by every Packrat layer.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`RuleId`] - Interned, stable identifiers for grammar rules
//! - [`Interner`] - Name table backing [`RuleId`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod intern;

pub use error::{Error, ErrorContext, ErrorKind};
pub use intern::{Interner, RuleId};

/// Result type used throughout Packrat.
pub type Result<T> = std::result::Result<T, Error>;
