//! Integration tests for command-line configuration and batch runs

use std::env;
use std::fs;
use std::process;

use packrat_foundation::ErrorKind;
use packrat_grammars::Language;
use packrat_runtime::{CliConfig, Input, OutputMode, load_from_file};

fn config(args: &[&str]) -> CliConfig {
    CliConfig::parse(args.iter().copied()).unwrap()
}

fn batch(args: &[&str]) -> String {
    let mut out = Vec::new();
    config(args).run_batch(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Argument Parsing
// =============================================================================

#[test]
fn no_inputs_means_interactive() {
    let config = config(&["--grammar", "sexp", "--stats"]);
    assert!(config.is_interactive());
    assert_eq!(config.language, Language::Sexp);
    assert!(config.stats);
}

#[test]
fn output_flags_override_each_other() {
    assert_eq!(config(&["--sql", "--outline"]).output, OutputMode::Outline);
    assert_eq!(config(&["--outline", "-o", "tree"]).output, OutputMode::Tree);
}

#[test]
fn inputs_keep_their_order() {
    let config = config(&["a.calc", "-e", "1", "b.calc"]);
    assert_eq!(
        config.inputs,
        vec![
            Input::File("a.calc".into()),
            Input::Inline("1".to_string()),
            Input::File("b.calc".into()),
        ]
    );
}

#[test]
fn help_and_version_flags() {
    assert!(config(&["-h"]).show_help);
    assert!(config(&["--version"]).show_version);
}

#[test]
fn unknown_grammar_is_reported() {
    let err = CliConfig::parse(["-g", "cobol"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownGrammar(_)));
}

// =============================================================================
// Batch Runs
// =============================================================================

#[test]
fn batch_prints_trees() {
    assert_eq!(
        batch(&["-e", "2+3*num"]),
        "(additive (int 2) + (multiplicative (int 3) * num))\n"
    );
}

#[test]
fn batch_prints_sql() {
    assert_eq!(
        batch(&["-g", "query", "--sql", "-e", "(SELECT (FROM t) a b)"]),
        "(SELECT a, b FROM t)\n"
    );
}

#[test]
fn batch_prints_outlines_with_spans() {
    assert_eq!(
        batch(&["-g", "sexp", "--outline", "--spans", "-e", "(a)"]),
        "list @1..2\n  a @1..2\n"
    );
}

#[test]
fn empty_input_prints_nothing() {
    assert_eq!(batch(&["-e", "   "]), "");
}

#[test]
fn batch_reads_files() {
    let path = env::temp_dir().join(format!("packrat_it_input_{}.sx", process::id()));
    fs::write(&path, "(a b)\n[c]").unwrap();
    let out = batch(&["-g", "sexp", path.to_str().unwrap()]);
    let _ = fs::remove_file(&path);
    assert_eq!(out, "(list a b)\n(vector c)\n");
}

#[test]
fn batch_dumps_every_input() {
    let path = env::temp_dir().join(format!("packrat_it_batch_{}.msgpack", process::id()));
    let path_arg = path.to_str().unwrap().to_string();
    batch(&["-e", "1", "-e", "x + y", "--dump", &path_arg]);

    let dump = load_from_file(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(dump.language().unwrap(), Language::Calc);
    assert_eq!(dump.source, "1\nx + y");
    assert_eq!(dump.trees.len(), 2);
    assert_eq!(dump.trees[1].span.text(&dump.source), "x + y");
}

#[test]
fn sql_output_rejects_other_grammars() {
    let config = config(&["-g", "sexp", "--sql", "-e", "(a)"]);
    let err = config.run_batch(&mut Vec::<u8>::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedShape { .. }));
}
