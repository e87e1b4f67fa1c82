// sprig-core - Error types for the Sprig evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Sprig evaluation.
//!
//! Every error has a kind and an optional source location. The kind's
//! message is what `try`/`catch` hands to the handler.

use std::fmt;

use sprig_parser::{LexerError, ParseError, ReadError, SourceLocation, SprigVal, printer};
use thiserror::Error as ThisError;

/// Result type for Sprig evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ErrorKind {
    /// Unterminated string, invalid escape.
    #[error("{0}")]
    Lexical(String),
    /// Unbalanced or unexpected delimiter, odd map literal.
    #[error("{0}")]
    Syntax(String),
    /// Unbound symbol.
    #[error("Unable to resolve symbol: {0}")]
    Reference(String),
    /// Malformed special form, pattern mismatch, bad argument.
    #[error("{0}")]
    InvalidParam(String),
    #[error("Cannot call value: {0}")]
    NotCallable(String),
    /// Raised by `throw`. Holds the display rendering of the thrown value.
    #[error("{0}")]
    Thrown(String),
    /// Reported by the host interop layer.
    #[error("{0}")]
    Host(String),
    /// A source file could not be read.
    #[error("{0}")]
    Io(String),
}

/// An evaluation error.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{}: {}", loc, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            location: None,
        }
    }
}

impl From<LexerError> for Error {
    fn from(e: LexerError) -> Self {
        Error {
            kind: ErrorKind::Lexical(e.message),
            location: Some(e.location),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error {
            kind: ErrorKind::Syntax(e.message),
            location: Some(e.location),
        }
    }
}

impl From<ReadError> for Error {
    fn from(e: ReadError) -> Self {
        match e {
            ReadError::Lexer(e) => e.into(),
            ReadError::Parse(e) => e.into(),
        }
    }
}

impl Error {
    pub fn reference(name: impl Into<String>) -> Self {
        ErrorKind::Reference(name.into()).into()
    }

    pub fn invalid_param(message: impl Into<String>) -> Self {
        ErrorKind::InvalidParam(message.into()).into()
    }

    /// Malformed use of the special form `form`.
    pub fn syntax(form: &str, message: impl fmt::Display) -> Self {
        Error::invalid_param(format!("Invalid '{}' form: {}", form, message))
    }

    /// Wrong number of arguments to `name`.
    pub fn arity(name: &str, expected: impl fmt::Display, got: usize) -> Self {
        Error::invalid_param(format!(
            "Wrong number of arguments to '{}': expected {}, got {}",
            name, expected, got
        ))
    }

    /// Wrong argument type to `name`.
    pub fn type_error(name: &str, expected: &str, got: &SprigVal) -> Self {
        Error::invalid_param(format!(
            "{}: expected {}, got {}",
            name,
            expected,
            got.type_name()
        ))
    }

    pub fn not_callable(value: &SprigVal) -> Self {
        ErrorKind::NotCallable(printer::render(value, true)).into()
    }

    /// The error raised by `(throw value)`.
    pub fn thrown(value: &SprigVal) -> Self {
        ErrorKind::Thrown(printer::display(value)).into()
    }

    pub fn host(message: impl Into<String>) -> Self {
        ErrorKind::Host(message.into()).into()
    }

    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ErrorKind::Io(format!("Cannot read {}: {}", path.display(), err)).into()
    }

    /// Attach `location` unless one is already present, so the innermost
    /// location wins as the error unwinds.
    #[must_use]
    pub fn at(mut self, location: Option<&SourceLocation>) -> Self {
        if self.location.is_none() {
            self.location = location.cloned();
        }
        self
    }

    /// The message without location, as bound by `catch`.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprig_parser::Position;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new("t.sp".into(), Position::new(line, 1, 0), Position::new(line, 2, 1))
    }

    #[test]
    fn test_display_with_location() {
        let err = Error::reference("foo").at(Some(&loc(3)));
        assert_eq!(err.to_string(), "t.sp:3:1: Unable to resolve symbol: foo");
        assert_eq!(err.message(), "Unable to resolve symbol: foo");
    }

    #[test]
    fn test_innermost_location_wins() {
        let err = Error::invalid_param("x").at(Some(&loc(2))).at(Some(&loc(1)));
        assert_eq!(err.location.map(|l| l.start.line), Some(2));
    }

    #[test]
    fn test_thrown_uses_display_rendering() {
        let err = Error::thrown(&SprigVal::string("boom"));
        assert_eq!(err.message(), "boom");
    }
}
