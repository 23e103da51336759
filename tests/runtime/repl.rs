//! Integration tests for the REPL
//!
//! Drives the REPL through a scripted [`LineEditor`].

use std::env;
use std::fs;
use std::process;

use packrat_foundation::Result;
use packrat_grammars::Language;
use packrat_runtime::{LineEditor, OutputMode, ReadResult, Repl, Reply, Session};

/// Replays fixed lines, then reports end of input.
struct ScriptedEditor {
    lines: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().rev().map(|l| (*l).to_string()).collect(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.pop().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn repl(language: Language, lines: &[&str]) -> Repl<ScriptedEditor> {
    let session = Session::new(language).unwrap();
    Repl::with_editor(ScriptedEditor::new(lines), session).without_banner()
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        other => panic!("expected text, got {other:?}"),
    }
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn parses_with_the_active_grammar() {
    let mut repl = repl(Language::Sexp, &[]);
    assert_eq!(text(repl.eval("(a 'b)").unwrap()), "(list a (quote b))");
}

#[test]
fn commands_change_the_session() {
    let mut repl = repl(Language::Calc, &[]);
    text(repl.eval(":grammar query").unwrap());
    text(repl.eval(":mode outline").unwrap());

    assert_eq!(repl.session().language(), Language::Query);
    assert_eq!(repl.session().output(), OutputMode::Outline);
    assert_eq!(
        text(repl.eval("(SELECT (FROM t) a)").unwrap()),
        "select\n  from\n    t\n  a"
    );
}

#[test]
fn stats_follow_the_output() {
    let mut repl = repl(Language::Calc, &[]);
    assert_eq!(text(repl.eval(":stats on").unwrap()), "stats: on");
    let out = text(repl.eval("1 + 2").unwrap());
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("(additive (int 1) + (int 2))"));
    assert!(lines.next().unwrap().contains("memo:"));
}

#[test]
fn bad_commands_are_errors() {
    let mut repl = repl(Language::Calc, &[]);
    assert!(repl.eval(":frobnicate").is_err());
    assert!(repl.eval(":trace maybe").is_err());
    assert!(repl.eval(":grammar calc extra").is_err());
    assert!(repl.eval(":save").is_err());
}

#[test]
fn help_lists_every_command() {
    let mut repl = repl(Language::Calc, &[]);
    let help = text(repl.eval(":help").unwrap());
    for command in [":grammar", ":mode", ":trace", ":stats", ":save", ":load", ":quit"] {
        assert!(help.contains(command), "missing {command}");
    }
}

#[test]
fn save_then_load_restores_grammar_and_trees() {
    let path = env::temp_dir().join(format!("packrat_it_repl_{}.msgpack", process::id()));
    let path = path.to_str().unwrap().to_string();

    let mut repl = repl(Language::Query, &[]);
    assert!(repl.eval(&format!(":save {path}")).is_err());
    repl.eval("(SELECT (FROM t) a)").unwrap();
    assert!(text(repl.eval(&format!(":save {path}")).unwrap()).starts_with("saved 1 tree(s)"));

    repl.eval(":grammar calc").unwrap();
    repl.eval(":mode sql").unwrap();
    let loaded = text(repl.eval(&format!(":load {path}")).unwrap());
    let _ = fs::remove_file(&path);

    assert_eq!(loaded, "(SELECT a FROM t)");
    assert_eq!(repl.session().language(), Language::Query);
}

// =============================================================================
// Loop
// =============================================================================

#[test]
fn run_joins_open_brackets_across_lines() {
    let mut repl = repl(Language::Sexp, &["(a", "  b)", "", ":quit", "(never)"]);
    repl.run().unwrap();
    let last = repl.session().last().unwrap();
    assert_eq!(last.source, "(a\n  b)");
    assert_eq!(last.trees[0].to_string(), "(list a b)");
}

#[test]
fn run_survives_errors() {
    let mut repl = repl(Language::Calc, &["1 +", ":nope", "7"]);
    repl.run().unwrap();
    assert_eq!(repl.session().last().unwrap().source, "7");
}

#[test]
fn run_stops_at_end_of_input() {
    let mut repl = repl(Language::Query, &["(SELECT", "(FROM t) a)"]);
    repl.run().unwrap();
    assert_eq!(repl.session().last().unwrap().trees.len(), 1);
}
