//! Top-level orchestration: run a file or an interactive prompt.
//!
//! Holds the `had_error` / `had_runtime_error` flags shared across the
//! scanner, parser, and interpreter phases, used only to pick an exit code —
//! the phases themselves never consult these flags to decide behavior.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 64;
pub const EXIT_DATA_ERROR: i32 = 65;
pub const EXIT_SOFTWARE_ERROR: i32 = 70;

/// Runs a script file to completion and returns the process exit code per
/// the documented contract: 65 on a static (scan/parse) error, 70 on a
/// runtime error, 0 otherwise.
pub fn run_file(path: &Path) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error reading '{}': {}", path.display(), err);
            return EXIT_DATA_ERROR;
        }
    };

    let mut interpreter = Interpreter::new();
    let mut had_error = false;
    let mut had_runtime_error = false;
    run_source(&source, &mut interpreter, &mut had_error, &mut had_runtime_error);

    if had_error {
        EXIT_DATA_ERROR
    } else if had_runtime_error {
        EXIT_SOFTWARE_ERROR
    } else {
        EXIT_OK
    }
}

/// Runs the interactive REPL: reads one line at a time, evaluating each as a
/// full program against a single long-lived interpreter so top-level `var`
/// and `fun` declarations persist across lines. Terminates at end-of-input.
pub fn run_repl() -> i32 {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) | None => break,
        };

        // Errors in one REPL line never end the session; only the
        // syntactic/runtime flags for that line are tracked and discarded.
        let mut had_error = false;
        let mut had_runtime_error = false;
        run_source(&line, &mut interpreter, &mut had_error, &mut had_runtime_error);
    }

    EXIT_OK
}

#[tracing::instrument(level = "trace", skip(source, interpreter))]
fn run_source(source: &str, interpreter: &mut Interpreter, had_error: &mut bool, had_runtime_error: &mut bool) {
    let (tokens, scan_errors) = Scanner::scan(source);
    for err in &scan_errors {
        eprintln!("{}", err);
    }
    if !scan_errors.is_empty() {
        *had_error = true;
    }

    let (statements, parse_errors) = Parser::parse(tokens);
    for err in &parse_errors {
        eprintln!("{}", err);
    }
    if !parse_errors.is_empty() {
        *had_error = true;
    }

    // A program with static errors is never executed.
    if *had_error {
        return;
    }

    if let Err(err) = interpreter.interpret(&statements) {
        eprintln!("{}", err);
        *had_runtime_error = true;
    }
}
