// sprig-parser - Source locations
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Source positions attached to tokens, parsed forms and errors.

use std::fmt;
use std::rc::Rc;

/// A single point in a source file. Lines and columns are 1-based,
/// `index` is the 0-based character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
    pub index: usize,
}

impl Position {
    pub fn new(line: usize, col: usize, index: usize) -> Self {
        Position { line, col, index }
    }
}

/// The span of a token or form within a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Rc<str>,
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(file: Rc<str>, start: Position, end: Position) -> Self {
        SourceLocation { file, start, end }
    }

    /// A location that starts at `self` and ends where `other` ends.
    #[must_use]
    pub fn to(&self, other: &SourceLocation) -> SourceLocation {
        SourceLocation {
            file: Rc::clone(&self.file),
            start: self.start,
            end: other.end,
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.start.line
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.start.col
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start.line, self.start.col)
    }
}

/// Locations are shared between tokens, forms and the values built from them.
pub type Span = Option<Rc<SourceLocation>>;
