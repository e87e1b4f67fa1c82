// sprig-parser - Parser for Sprig
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Recursive descent parser for Sprig source code.
//!
//! Tokens are consumed from the front of a queue, so each call to
//! [`Parser::parse`] reads exactly one top-level form and later calls pick
//! up where it stopped.

use std::collections::VecDeque;
use std::rc::Rc;

use im::Vector;
use thiserror::Error;

use crate::keyword::Keyword;
use crate::lexer::{LexerError, Token, TokenKind, tokenize};
use crate::location::{SourceLocation, Span};
use crate::symbol::Symbol;
use crate::value::SprigVal;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {location}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

/// Any failure while reading source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The parser converts tokens into `SprigVal` forms.
pub struct Parser {
    tokens: VecDeque<Token>,
    /// Location of the last token consumed, for end-of-input errors.
    last: Option<Rc<SourceLocation>>,
}

impl Parser {
    /// Tokenise `source` and prepare to parse it. Lexical errors are
    /// reported here, before any form is read.
    pub fn new(source: &str, file: &str) -> Result<Self, LexerError> {
        Ok(Parser::from_tokens(tokenize(source, file)?))
    }

    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().collect(),
            last: None,
        }
    }

    /// Parse the next top-level form, or `None` when the input is exhausted.
    pub fn parse(&mut self) -> Result<Option<SprigVal>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }
        self.parse_form().map(Some)
    }

    /// Parse all remaining forms.
    pub fn parse_all(&mut self) -> Result<Vec<SprigVal>, ParseError> {
        let mut forms = Vec::new();
        while let Some(form) = self.parse()? {
            forms.push(form);
        }
        Ok(forms)
    }

    /// Number of tokens not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front()?;
        self.last = Some(Rc::clone(&token.location));
        Some(token)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.front().map(|t| &t.kind)
    }

    fn error(location: &SourceLocation, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            location: location.clone(),
        }
    }

    fn parse_form(&mut self) -> Result<SprigVal, ParseError> {
        let Some(token) = self.advance() else {
            let location = self.last.as_deref().cloned().unwrap_or_else(|| {
                SourceLocation::new("".into(), Default::default(), Default::default())
            });
            return Err(Self::error(&location, "Unexpected end of input"));
        };

        match token.kind {
            TokenKind::LParen => {
                let (items, span) =
                    self.parse_seq(&token, &TokenKind::RParen, "Unbalanced list: missing ')'")?;
                Ok(SprigVal::List(items, span))
            }
            TokenKind::LBracket => {
                let (items, span) =
                    self.parse_seq(&token, &TokenKind::RBracket, "Unbalanced vector: missing ']'")?;
                Ok(SprigVal::Vector(items, span))
            }
            TokenKind::LBrace => self.parse_map(&token),
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => Err(Self::error(
                &token.location,
                format!("Unexpected '{}'", token.text),
            )),
            TokenKind::Quote => self.parse_quote("quote", &token),
            TokenKind::SyntaxQuote => self.parse_quote("quasiquote", &token),
            TokenKind::Unquote => self.parse_quote("unquote", &token),
            TokenKind::Deref => self.parse_quote("deref", &token),
            TokenKind::Str(s) => Ok(SprigVal::String(Rc::from(s))),
            TokenKind::Atom => Ok(classify_atom(&token.text, token.location)),
        }
    }

    /// Read forms until `close`. A missing close is reported at the opening
    /// token.
    fn parse_seq(
        &mut self,
        open: &Token,
        close: &TokenKind,
        unbalanced: &str,
    ) -> Result<(Vector<SprigVal>, Span), ParseError> {
        let mut items = Vector::new();
        loop {
            match self.peek_kind() {
                None => return Err(Self::error(&open.location, unbalanced)),
                Some(kind) if kind == close => break,
                Some(_) => items.push_back(self.parse_form()?),
            }
        }
        let span = self.close_span(open);
        Ok((items, span))
    }

    fn parse_map(&mut self, open: &Token) -> Result<SprigVal, ParseError> {
        const UNBALANCED: &str = "Unbalanced map: every key needs a value";
        let mut pairs = Vector::new();
        loop {
            match self.peek_kind() {
                None => return Err(Self::error(&open.location, "Unbalanced map: missing '}'")),
                Some(TokenKind::RBrace) => break,
                Some(_) => {}
            }
            let key = self.parse_form()?;
            if matches!(self.peek_kind(), None | Some(TokenKind::RBrace)) {
                return Err(Self::error(&open.location, UNBALANCED));
            }
            let value = self.parse_form()?;
            pairs.push_back((key, value));
        }
        let span = self.close_span(open);
        Ok(SprigVal::MapForm(pairs, span))
    }

    /// Consume the closing token and return the span from `open` to it.
    fn close_span(&mut self, open: &Token) -> Span {
        match self.advance() {
            Some(close) => Some(Rc::new(open.location.to(&close.location))),
            None => Some(Rc::clone(&open.location)),
        }
    }

    fn parse_quote(&mut self, name: &str, token: &Token) -> Result<SprigVal, ParseError> {
        if self.tokens.is_empty() {
            return Err(Self::error(
                &token.location,
                format!("Expected a form after '{}'", token.text),
            ));
        }
        let form = self.parse_form()?;
        let span = Some(Rc::clone(&token.location));
        let tag = SprigVal::Symbol(Symbol::new(name), span.clone());
        Ok(SprigVal::List(Vector::from(vec![tag, form]), span))
    }
}

/// Classify a bare token: keyword, then number, then the literals
/// `true`, `false` and `nil`, then symbol.
fn classify_atom(text: &str, location: Rc<SourceLocation>) -> SprigVal {
    if let Some(name) = text.strip_prefix(':')
        && !name.is_empty()
    {
        return SprigVal::Keyword(Keyword::new(name));
    }
    if let Some(n) = parse_number(text) {
        return SprigVal::Number(n);
    }
    match text {
        "true" => SprigVal::Bool(true),
        "false" => SprigVal::Bool(false),
        "nil" => SprigVal::Nil,
        _ => SprigVal::Symbol(Symbol::new(text), Some(location)),
    }
}

/// Numbers must start like a number, so symbols such as `inf` or `nan`
/// stay symbols.
fn parse_number(text: &str) -> Option<f64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let first = digits.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse every form in `source`.
pub fn read_all(source: &str, file: &str) -> Result<Vec<SprigVal>, ReadError> {
    Ok(Parser::new(source, file)?.parse_all()?)
}

/// Parse the first form in `source`.
pub fn read(source: &str) -> Result<Option<SprigVal>, ReadError> {
    Ok(Parser::new(source, "<input>")?.parse()?)
}

// ============================================================================
// Tests
// ============================================================================
