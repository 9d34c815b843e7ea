//! jlox: a tree-walking interpreter for the Lox scripting language.

pub mod ast;
pub mod callable;
pub mod driver;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod value;

/// Installs the `tracing` subscriber used by the binary and by integration
/// tests that want visibility into scan/parse/interpret phases. Driven by
/// `RUST_LOG`; defaults to `warn` so ordinary runs stay quiet.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
