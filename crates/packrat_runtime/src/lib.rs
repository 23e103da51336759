//! REPL, CLI, and serialization for Packrat.
//!
//! This crate provides:
//! - [`Repl`] - Interactive read-eval-print loop over any shipped grammar
//! - [`CliConfig`] - Command-line argument parsing and batch execution
//! - [`TreeDump`] - `MessagePack` dumps of parsed trees

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod editor;
pub mod highlight;
pub mod repl;
pub mod serialize;
pub mod session;

pub use cli::{CliConfig, Input};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, Reply};
pub use serialize::{TreeDump, from_bytes, load_from_file, save_to_file, to_bytes};
pub use session::{OutputMode, Session, format_stats};
