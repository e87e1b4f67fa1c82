// sprig-parser - Reader and data model for the Sprig language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # sprig-parser
//!
//! Lexer and parser for the Sprig language, together with the value model,
//! the persistent hash map that backs map values, and the printer.

pub mod hamt;
pub mod hash;
mod intern;
pub mod keyword;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod printer;
pub mod symbol;
pub mod value;

pub use hamt::{PersistentMap, TrieKey};
pub use im::Vector;
pub use keyword::Keyword;
pub use lexer::{Lexer, LexerError, Token, TokenKind, tokenize};
pub use location::{Position, SourceLocation, Span};
pub use parser::{ParseError, Parser, ReadError, read, read_all};
pub use printer::{display, render};
pub use symbol::{HOST_PREFIX, Symbol};
pub use value::{HostObject, SprigAtom, SprigFn, SprigMap, SprigNativeFn, SprigVal, map_lookup};
