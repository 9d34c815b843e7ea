//! jlox entry point.
//!
//! Dispatches between running a script file and launching the interactive
//! prompt, based on the number of command-line arguments.

use std::path::PathBuf;
use std::process::ExitCode;

use jlox::driver;

fn main() -> ExitCode {
    jlox::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let code = match args.as_slice() {
        [] => driver::run_repl(),
        [path] => driver::run_file(&PathBuf::from(path)),
        _ => {
            eprintln!("Usage: jlox [script]");
            driver::EXIT_USAGE
        }
    };

    ExitCode::from(code as u8)
}
