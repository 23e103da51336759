//! Tree serialization and deserialization using `MessagePack`.
//!
//! A [`TreeDump`] records which grammar produced a set of trees and the
//! source they came from, so a dump can be inspected or re-rendered later
//! without parsing again.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use packrat_engine::NodeRef;
use packrat_foundation::{Error, ErrorKind, Result};
use packrat_grammars::Language;
use serde::{Deserialize, Serialize};

/// Parsed trees together with their origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDump {
    /// Name of the grammar that produced the trees.
    pub language: String,
    /// The parsed source text.
    pub source: String,
    /// Top-level trees, in source order.
    pub trees: Vec<NodeRef>,
}

impl TreeDump {
    /// Creates a dump.
    #[must_use]
    pub fn new(language: Language, source: impl Into<String>, trees: Vec<NodeRef>) -> Self {
        Self {
            language: language.name().to_string(),
            source: source.into(),
            trees,
        }
    }

    /// Adds another input to the dump.
    ///
    /// Inputs are separated by a newline in `source`, and the new trees'
    /// spans are moved so they index into the combined text.
    pub fn append(&mut self, source: &str, trees: &[NodeRef]) {
        if !self.source.is_empty() || !self.trees.is_empty() {
            self.source.push('\n');
        }
        let offset = self.source.len();
        self.source.push_str(source);
        self.trees.extend(trees.iter().map(|tree| tree.shifted(offset)));
    }

    /// Returns the grammar that produced the trees.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded name is not a known grammar.
    pub fn language(&self) -> Result<Language> {
        self.language.parse()
    }
}

/// Serializes a dump to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(dump: &TreeDump) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(dump)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a dump from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<TreeDump> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {e}",
        path.display()
    )))
}

/// Saves a dump to a file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(dump: &TreeDump, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(dump)?;

    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;

    Ok(())
}

/// Loads a dump from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<TreeDump> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;

    from_bytes(&bytes)
}
