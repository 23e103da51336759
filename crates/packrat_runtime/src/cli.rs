//! Command-line argument parsing and batch execution.
//!
//! Arguments are parsed by hand. Without any input the binary starts the
//! REPL; otherwise every input is parsed in order and printed to stdout,
//! with traces and statistics on stderr.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use packrat_foundation::{Error, ErrorKind, Result};
use packrat_grammars::{Language, TreeConfig};

use crate::serialize::{TreeDump, save_to_file};
use crate::session::{OutputMode, Session, format_stats};

/// One piece of source to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Source given with `-e`.
    Inline(String),
    /// A file to read.
    File(PathBuf),
}

impl Input {
    fn read(&self) -> Result<String> {
        match self {
            Self::Inline(source) => Ok(source.clone()),
            Self::File(path) => fs::read_to_string(path).map_err(|e| {
                Error::new(ErrorKind::IoError(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }),
        }
    }
}

/// CLI configuration parsed from arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CliConfig {
    /// Grammar to parse with.
    pub language: Language,
    /// Sources, in the order given.
    pub inputs: Vec<Input>,
    /// How trees are printed.
    pub output: OutputMode,
    /// Append byte ranges to outline lines.
    pub spans: bool,
    /// Print rule applications.
    pub trace: bool,
    /// Print memo statistics.
    pub stats: bool,
    /// Write every parsed tree to this `MessagePack` file.
    pub dump: Option<PathBuf>,
    /// Print usage and exit.
    pub show_help: bool,
    /// Print the version and exit.
    pub show_version: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            language: Language::Calc,
            inputs: Vec::new(),
            output: OutputMode::Tree,
            spans: false,
            trace: false,
            stats: false,
            dump: None,
            show_help: false,
            show_version: false,
        }
    }
}

fn bad_usage(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Internal(message.into()))
}

impl CliConfig {
    /// Parses arguments, not including the program name.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown option, a missing option value, or
    /// an unknown grammar or output mode.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| bad_usage(format!("{name} requires a value")))
            };

            match arg.as_str() {
                "-h" | "--help" => config.show_help = true,
                "-V" | "--version" => config.show_version = true,
                "-g" | "--grammar" => config.language = value("--grammar")?.parse()?,
                "-e" | "--expr" => config.inputs.push(Input::Inline(value("--expr")?)),
                "-o" | "--output" => config.output = value("--output")?.parse()?,
                "--sql" => config.output = OutputMode::Sql,
                "--outline" => config.output = OutputMode::Outline,
                "--spans" => config.spans = true,
                "--trace" => config.trace = true,
                "--stats" => config.stats = true,
                "--dump" => config.dump = Some(PathBuf::from(value("--dump")?)),
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(bad_usage(format!("unknown option: {other}")));
                }
                path => config.inputs.push(Input::File(PathBuf::from(path))),
            }
        }

        Ok(config)
    }

    /// Returns true if there is nothing to parse, so the REPL should start.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Builds a session with these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be built.
    pub fn session(&self) -> Result<Session> {
        let mut session = Session::new(self.language)?;
        session.set_output(self.output);
        session.set_tracing(self.trace);
        session.set_show_stats(self.stats);
        if self.spans {
            session.set_tree_config(TreeConfig::default().with_spans());
        }
        Ok(session)
    }

    /// Parses every input and writes the rendered trees to `out`.
    ///
    /// Stops at the first input that fails. With `dump` set, the trees of
    /// every input are saved together once all of them have parsed.
    ///
    /// # Errors
    ///
    /// Returns the first read, scan, parse, render, or write error.
    pub fn run_batch(&self, out: &mut impl Write) -> Result<()> {
        let mut session = self.session()?;
        let mut dump = TreeDump::new(self.language, "", Vec::new());

        for input in &self.inputs {
            let source = input.read()?;
            let parsed = session.parse(&source)?;
            if let Some(trace) = &parsed.trace {
                eprintln!("{trace}");
            }
            if self.stats {
                eprintln!("{}", format_stats(&parsed.stats));
            }
            let parsed_trees = parsed.nodes?;

            let text = session.render(&parsed_trees)?;
            if !text.is_empty() {
                writeln!(out, "{text}")
                    .map_err(|e| Error::new(ErrorKind::IoError(e.to_string())))?;
            }

            dump.append(&source, &parsed_trees);
        }

        if let Some(path) = &self.dump {
            save_to_file(&dump, path)?;
        }

        Ok(())
    }
}

/// Usage text for `--help`.
#[must_use]
pub fn help_text() -> String {
    format!(
        "\x1b[1mPackrat\x1b[0m {} - Packrat parser driver

\x1b[1mUSAGE:\x1b[0m
    packrat [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Files to parse; without files or -e, start the REPL

\x1b[1mOPTIONS:\x1b[0m
    -g, --grammar NAME   Grammar: calc (default), sexp, query
    -e, --expr SOURCE    Parse SOURCE (may be repeated)
    -o, --output MODE    Output: tree (default), outline, sql
        --sql            Same as --output sql
        --outline        Same as --output outline
        --spans          Show byte ranges in outlines
        --trace          Print rule applications to stderr
        --stats          Print memo statistics to stderr
        --dump FILE      Save all parsed trees as MessagePack
    -h, --help           Print help information
    -V, --version        Print version information

\x1b[1mEXAMPLES:\x1b[0m
    packrat -e '2+3*num'
    packrat -g sexp --outline init.el
    packrat -g query --sql -e '(SELECT (FROM t) a)'
    packrat -g query --trace --stats queries.sx",
        env!("CARGO_PKG_VERSION")
    )
}
