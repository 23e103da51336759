//! Packrat CLI entry point.

use std::env;
use std::io;
use std::process::ExitCode;

use packrat_foundation::Error;
use packrat_runtime::cli::help_text;
use packrat_runtime::{CliConfig, Repl};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            if let Some(context) = e.downcast_ref::<Error>().and_then(|e| e.context.as_ref()) {
                eprintln!("\x1b[2m  {context}\x1b[0m");
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse(env::args().skip(1))?;

    if config.show_help {
        println!("{}", help_text());
        return Ok(());
    }

    if config.show_version {
        println!("packrat {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.is_interactive() {
        let mut repl = Repl::new(config.session()?)?;
        repl.run()?;
        return Ok(());
    }

    let stdout = io::stdout();
    config.run_batch(&mut stdout.lock())?;
    Ok(())
}
