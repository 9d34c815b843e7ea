//! Diagnostic and runtime error types.
//!
//! Three kinds of failure are modeled as distinct types rather than one grab-bag
//! error: a [`ScanError`] and a [`ParseError`] are accumulated and reported but
//! never halt their phase; a [`RuntimeError`] halts interpretation. None of the
//! three is used to carry the `return` control-flow signal — see
//! [`crate::interpreter::Signal`].

use std::fmt;

use thiserror::Error;

use crate::token::{Token, TokenType};

/// A lexical error raised by the scanner. The scanner reports these and continues.
#[derive(Debug, Clone, Error)]
#[error("[line {line}] Error: {message}")]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

/// A syntax error raised by the parser. Caught by `declaration` and used to drive
/// `synchronize`; reported via [`Diagnostic`] but does not stop parsing.
///
/// `Display` is implemented by hand rather than via `#[error(...)]`: the
/// location clause (`at end` vs. `at '<lexeme>'`) is conditional on the
/// token, which a single format literal can't express.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        ParseError {
            token,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = if self.token.kind == TokenType::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.token.lexeme)
        };
        write!(f, "[line {}] Error{}: {}", self.token.line, loc, self.message)
    }
}

impl std::error::Error for ParseError {}

/// A runtime error raised by the interpreter. Halts interpretation of the current
/// program; reported to the driver, which sets the runtime-error exit status.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError {
            token,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[line {}]", self.message, self.token.line)
    }
}

impl std::error::Error for RuntimeError {}

/// A scan or parse error, accumulated by the driver across a whole source file.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    Scan(ScanError),
    Parse(ParseError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Scan(e) => write!(f, "{}", e),
            Diagnostic::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl From<ScanError> for Diagnostic {
    fn from(e: ScanError) -> Self {
        Diagnostic::Scan(e)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(e: ParseError) -> Self {
        Diagnostic::Parse(e)
    }
}
