// sprig-parser - Lexer for Sprig
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Lexer (tokeniser) for Sprig source code.
//!
//! Converts a source string into positioned tokens in a single
//! left-to-right pass. Whitespace, commas and `;` comments are skipped.
//! Anything that is not a delimiter, reader macro or string becomes an
//! [`TokenKind::Atom`], classified later by the parser.

use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

use thiserror::Error;

use crate::location::{Position, SourceLocation};

/// The shape of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }

    // Reader macros
    Quote,       // '
    SyntaxQuote, // `
    Unquote,     // ~
    Deref,       // @

    /// A string literal, already unescaped.
    Str(String),
    /// Any other run of non-delimiter characters.
    Atom,
}

/// A token with its source text and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text, including quotes for strings.
    pub text: String,
    pub location: Rc<SourceLocation>,
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {location}")]
pub struct LexerError {
    pub message: String,
    pub location: SourceLocation,
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '`' | '~' | '@')
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// The lexer converts source code into tokens.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    file: Rc<str>,
    line: usize,
    column: usize,
    index: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer. `file` names the source in locations.
    pub fn new(source: &'a str, file: &str) -> Self {
        Lexer {
            chars: source.chars().peekable(),
            file: Rc::from(file),
            line: 1,
            column: 1,
            index: 0,
        }
    }

    /// Read the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        self.skip_whitespace_and_comments();

        let start = self.position();
        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '\'' => TokenKind::Quote,
            '`' => TokenKind::SyntaxQuote,
            '~' => TokenKind::Unquote,
            '@' => TokenKind::Deref,
            '"' => return self.read_string(start).map(Some),
            c => return Ok(Some(self.read_atom(c, start))),
        };

        Ok(Some(Token {
            kind,
            text: c.to_string(),
            location: self.location_from(start),
        }))
    }

    /// Tokenise the whole input.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.index += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, self.index)
    }

    fn location_from(&self, start: Position) -> Rc<SourceLocation> {
        Rc::new(SourceLocation::new(
            Rc::clone(&self.file),
            start,
            self.position(),
        ))
    }

    fn error_at(&self, start: Position, end: Position, message: impl Into<String>) -> LexerError {
        LexerError {
            message: message.into(),
            location: SourceLocation::new(Rc::clone(&self.file), start, end),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            if is_whitespace(c) {
                self.advance();
            } else if c == ';' {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_atom(&mut self, first: char, start: Position) -> Token {
        let mut text = String::from(first);
        while let Some(c) = self.peek() {
            if is_whitespace(c) || is_delimiter(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
        Token {
            kind: TokenKind::Atom,
            text,
            location: self.location_from(start),
        }
    }

    /// Read a string whose opening quote has been consumed. Only the
    /// escapes `\" \\ \n \t` are accepted.
    fn read_string(&mut self, start: Position) -> Result<Token, LexerError> {
        let mut text = String::from('"');
        let mut content = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    let here = self.position();
                    return Err(self.error_at(start, here, "Unterminated string"));
                }
                Some('"') => {
                    self.advance();
                    text.push('"');
                    break;
                }
                Some('\\') => {
                    let escape_start = self.position();
                    self.advance();
                    text.push('\\');
                    let escaped = match self.peek() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('n') => '\n',
                        Some('t') => '\t',
                        None | Some('\n') => {
                            let here = self.position();
                            return Err(self.error_at(start, here, "Unterminated string"));
                        }
                        Some(other) => {
                            let mut end = self.position();
                            end.col += 1;
                            end.index += 1;
                            return Err(self.error_at(
                                escape_start,
                                end,
                                format!("Invalid escape sequence: \\{}", other),
                            ));
                        }
                    };
                    if let Some(raw) = self.advance() {
                        text.push(raw);
                    }
                    content.push(escaped);
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                    content.push(c);
                }
            }
        }
        Ok(Token {
            kind: TokenKind::Str(content),
            text,
            location: self.location_from(start),
        })
    }
}

/// Tokenise `source`, naming it `file` in locations.
pub fn tokenize(source: &str, file: &str) -> Result<Vec<Token>, LexerError> {
    Lexer::new(source, file).tokenize()
}

// ============================================================================
// Tests
// ============================================================================
