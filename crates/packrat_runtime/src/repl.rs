//! The main REPL implementation.
//!
//! Every input line is either a `:command` or source text for the active
//! grammar. Source that leaves a bracket open continues on the next line.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

use packrat_foundation::{Error, ErrorKind, Result};
use packrat_grammars::Language;

use crate::editor::{LineEditor, ReadResult, RustylineEditor, bracket_depth};
use crate::serialize::{load_from_file, save_to_file};
use crate::session::{OutputMode, Session, format_stats};

/// REPL commands: name, arguments, description.
pub const COMMANDS: [(&str, &str, &str); 8] = [
    (":help", "", "Show this help"),
    (":grammar", "[NAME]", "Show or switch the grammar (calc, sexp, query)"),
    (":mode", "[MODE]", "Show or switch the output (tree, outline, sql)"),
    (":trace", "[on|off]", "Print rule applications while parsing"),
    (":stats", "[on|off]", "Print memo statistics after each parse"),
    (":save", "PATH", "Save the last parse as MessagePack"),
    (":load", "PATH", "Load and print a saved parse"),
    (":quit", "", "Exit"),
];

/// What the REPL should do after one input.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print this text.
    Text(String),
    /// Nothing to print.
    Silent,
    /// Leave the loop.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Grammar and output settings.
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
            continuation_prompt: ".. ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    self.print_error(&e);
                }
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false); // EOF
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Silent) => {}
            Ok(Reply::Quit) => return Ok(false),
            Err(e) => self.print_error(&e),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let prompt = if first_line {
                format!("{}> ", self.session.language())
            } else {
                self.continuation_prompt.clone()
            };

            match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => {
                    if first_line {
                        input = line;
                    } else {
                        input.push('\n');
                        input.push_str(&line);
                    }

                    if is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if first_line {
                        println!();
                    } else {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Internal(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    /// Handles one complete input.
    ///
    /// Rule traces go straight to stderr, so they appear even when the
    /// parse fails.
    ///
    /// # Errors
    ///
    /// Returns an error for a bad command, a scan failure, input the grammar
    /// rejects, or a tree the output mode cannot render.
    pub fn eval(&mut self, input: &str) -> Result<Reply> {
        let trimmed = input.trim();
        if trimmed.starts_with(':') {
            return self.eval_command(trimmed);
        }

        let parsed = self.session.parse(input)?;
        if let Some(trace) = &parsed.trace {
            eprintln!("\x1b[2m{trace}\x1b[0m");
        }
        let trees = parsed.nodes?;

        let mut text = self.session.render(&trees)?;
        if self.session.show_stats() {
            if !text.is_empty() {
                text.push('\n');
            }
            let _ = write!(text, "\x1b[2m{}\x1b[0m", format_stats(&parsed.stats));
        }

        Ok(if text.is_empty() {
            Reply::Silent
        } else {
            Reply::Text(text)
        })
    }

    fn eval_command(&mut self, line: &str) -> Result<Reply> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let arg = words.next();
        if let Some(extra) = words.next() {
            return Err(usage(format!("unexpected argument '{extra}' to {command}")));
        }

        match (command, arg) {
            (":help" | ":h", _) => Ok(Reply::Text(help_text())),
            (":quit" | ":q", _) => Ok(Reply::Quit),
            (":grammar", None) => {
                let names: Vec<_> = Language::ALL.iter().map(|l| l.name()).collect();
                Ok(Reply::Text(format!(
                    "grammar: {} (available: {})",
                    self.session.language(),
                    names.join(", ")
                )))
            }
            (":grammar", Some(name)) => {
                self.session.set_language(name.parse()?)?;
                Ok(Reply::Text(format!("grammar: {}", self.session.language())))
            }
            (":mode", None) => Ok(Reply::Text(format!("mode: {}", self.session.output()))),
            (":mode", Some(mode)) => {
                self.session.set_output(mode.parse::<OutputMode>()?);
                Ok(Reply::Text(format!("mode: {}", self.session.output())))
            }
            (":trace", arg) => {
                let enabled = switch(arg, self.session.tracer().enabled)?;
                self.session.set_tracing(enabled);
                Ok(Reply::Text(format!("trace: {}", on_off(enabled))))
            }
            (":stats", arg) => {
                let enabled = switch(arg, self.session.show_stats())?;
                self.session.set_show_stats(enabled);
                Ok(Reply::Text(format!("stats: {}", on_off(enabled))))
            }
            (":save", Some(path)) => {
                let Some(dump) = self.session.last() else {
                    return Err(usage("nothing has been parsed yet"));
                };
                save_to_file(dump, path)?;
                Ok(Reply::Text(format!(
                    "saved {} tree(s) to {}",
                    dump.trees.len(),
                    Path::new(path).display()
                )))
            }
            (":load", Some(path)) => {
                let dump = load_from_file(path)?;
                self.session.set_language(dump.language()?)?;
                let text = self.session.render(&dump.trees)?;
                self.session.set_last(dump);
                Ok(Reply::Text(text))
            }
            (":save" | ":load", None) => Err(usage(format!("{command} requires a path"))),
            _ => Err(usage(format!("unknown command: {command} (try :help)"))),
        }
    }

    /// Prints an error to stderr.
    #[allow(clippy::unused_self)]
    fn print_error(&self, error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
        if let Some(context) = &error.context {
            eprintln!("\x1b[2m  {context}\x1b[0m");
        }
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        println!("\x1b[1;36mPackrat\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!(
            "Grammar: {}. Type :help for commands, Ctrl+D to exit.\n",
            self.session.language()
        );

        // Flush to ensure banner appears
        let _ = io::stdout().flush();
    }
}

/// Checks if input is syntactically complete (balanced brackets, closed
/// strings).
fn is_complete(input: &str) -> bool {
    matches!(bracket_depth(input), Some(depth) if depth <= 0)
}

fn usage(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Internal(message.into()))
}

fn switch(arg: Option<&str>, current: bool) -> Result<bool> {
    match arg {
        None => Ok(!current),
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        Some(other) => Err(usage(format!("expected on or off, got '{other}'"))),
    }
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn help_text() -> String {
    let mut text = String::from("Commands:");
    for (name, args, description) in COMMANDS {
        let _ = write!(text, "\n  {name:<9} {args:<9} {description}");
    }
    text.push_str("\nAnything else is parsed with the active grammar.");
    text
}
