//! Session state shared by the REPL and the command line.
//!
//! A session holds the active grammar, the evaluation settings, how trees
//! are printed, and the most recent successful parse.

use std::fmt;
use std::str::FromStr;

use packrat_engine::{EvalConfig, Evaluator, MemoStats, NodeRef, TracerConfig};
use packrat_foundation::{Error, ErrorKind, Result};
use packrat_grammars::{Language, LanguageParser, Parsed, TreeConfig, render_sql, render_trees};

use crate::serialize::TreeDump;

/// How parsed trees are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One compact s-expression per tree.
    #[default]
    Tree,
    /// Indented outline, one node per line.
    Outline,
    /// SQL text; only meaningful for the query grammar.
    Sql,
}

impl OutputMode {
    /// Every mode, in display order.
    pub const ALL: [Self; 3] = [Self::Tree, Self::Outline, Self::Sql];

    /// Returns the mode's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Outline => "outline",
            Self::Sql => "sql",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| {
                Error::new(ErrorKind::Internal(format!(
                    "unknown output mode '{s}' (expected tree, outline, or sql)"
                )))
            })
    }
}

/// Session state for parsing and printing.
pub struct Session {
    parser: LanguageParser,
    tracer: TracerConfig,
    show_stats: bool,
    output: OutputMode,
    tree_config: TreeConfig,
    last: Option<TreeDump>,
}

impl Session {
    /// Creates a session for `language` with tracing and statistics off.
    ///
    /// # Errors
    ///
    /// Returns an error if the language's grammar cannot be built.
    pub fn new(language: Language) -> Result<Self> {
        Ok(Self {
            parser: language.parser()?,
            tracer: TracerConfig::default(),
            show_stats: false,
            output: OutputMode::default(),
            tree_config: TreeConfig::default(),
            last: None,
        })
    }

    /// Returns the active language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.parser.language()
    }

    /// Switches to another language. The last parse is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the language's grammar cannot be built.
    pub fn set_language(&mut self, language: Language) -> Result<()> {
        if language != self.language() {
            self.parser = language.parser()?;
        }
        Ok(())
    }

    /// Returns the tracer configuration.
    #[must_use]
    pub const fn tracer(&self) -> &TracerConfig {
        &self.tracer
    }

    /// Enables or disables rule tracing.
    pub fn set_tracing(&mut self, enabled: bool) {
        self.tracer.enabled = enabled;
    }

    /// Returns whether memo statistics are printed.
    #[must_use]
    pub const fn show_stats(&self) -> bool {
        self.show_stats
    }

    /// Enables or disables memo statistics.
    pub fn set_show_stats(&mut self, show: bool) {
        self.show_stats = show;
    }

    /// Returns the output mode.
    #[must_use]
    pub const fn output(&self) -> OutputMode {
        self.output
    }

    /// Sets the output mode.
    pub fn set_output(&mut self, output: OutputMode) {
        self.output = output;
    }

    /// Sets how outlines are drawn.
    pub fn set_tree_config(&mut self, config: TreeConfig) {
        self.tree_config = config;
    }

    /// Returns the most recent successful parse.
    #[must_use]
    pub const fn last(&self) -> Option<&TreeDump> {
        self.last.as_ref()
    }

    /// Replaces the most recent parse, e.g. with one loaded from disk.
    pub fn set_last(&mut self, dump: TreeDump) {
        self.last = Some(dump);
    }

    /// Parses `source` with the active language and settings.
    ///
    /// A successful parse becomes [`Session::last`].
    ///
    /// # Errors
    ///
    /// Returns an error only if `source` does not scan; grammar mismatches
    /// are reported through [`Parsed::nodes`].
    pub fn parse(&mut self, source: &str) -> Result<Parsed> {
        let evaluator = Evaluator::new(EvalConfig::default().with_tracer(self.tracer.clone()));
        let parsed = self.parser.parse_with(source, &evaluator)?;
        if let Ok(trees) = &parsed.nodes {
            self.last = Some(TreeDump::new(self.language(), source, trees.clone()));
        }
        Ok(parsed)
    }

    /// Prints `trees` in the current output mode.
    ///
    /// # Errors
    ///
    /// Returns an error in SQL mode if a tree is not a query.
    pub fn render(&self, trees: &[NodeRef]) -> Result<String> {
        match self.output {
            OutputMode::Tree => Ok(trees
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputMode::Outline => Ok(render_trees(
                trees.iter().map(AsRef::as_ref),
                &self.tree_config,
            )),
            OutputMode::Sql => Ok(trees
                .iter()
                .map(|tree| render_sql(tree))
                .collect::<Result<Vec<_>>>()?
                .join("\n")),
        }
    }
}

/// Formats memo counters as a single line.
#[must_use]
pub fn format_stats(stats: &MemoStats) -> String {
    format!(
        "memo: {} hits, {} misses, {} entries ({:.1}% hit rate)",
        stats.hits,
        stats.misses,
        stats.entries,
        stats.hit_rate() * 100.0
    )
}
