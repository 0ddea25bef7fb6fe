//! Single-pass recursive-descent JSON parser.
//!
//! The parser walks the input left to right with one cursor, dispatching on
//! the next non-whitespace byte. Each grammatical production allocates
//! exactly one [`Node`] from the arena; object members and array elements
//! are linked through the nodes' intrusive `first_child` / `next_sibling`
//! pointers, so the finished tree involves no `Vec` and no per-node heap
//! allocation. String and number values are views into the input buffer:
//! nothing is copied and escape sequences are preserved verbatim.
//!
//! Malformed input surfaces as a [`ParseError`] carrying the byte offset at
//! which the parse stopped. There is no recovery and no backtracking; the
//! cursor only ever moves forward.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::arena::Arena;
use crate::node::{Node, NodeType};
use crate::swar;

// =============================================================================
// Parse errors
// =============================================================================

/// What went wrong, without the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// Input ended while a value, key, colon, or delimiter was required.
    UnexpectedEof,
    /// A byte no production accepts at this position.
    UnexpectedByte(u8),
    /// A `t`/`f`/`n` run that is not `true`, `false`, or `null`.
    BadLiteral,
    /// No unescaped closing quote before end of input.
    UnterminatedString,
}

/// A parse failure: the kind of error plus the byte offset it occurred at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError { kind, offset }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::UnexpectedEof => {
                write!(f, "unexpected end of input at offset {}", self.offset)
            }
            ParseErrorKind::UnexpectedByte(byte) => {
                if byte.is_ascii_graphic() {
                    write!(
                        f,
                        "unexpected byte '{}' at offset {}",
                        byte as char, self.offset
                    )
                } else {
                    write!(f, "unexpected byte {byte:#04x} at offset {}", self.offset)
                }
            }
            ParseErrorKind::BadLiteral => {
                write!(f, "malformed literal at offset {}", self.offset)
            }
            ParseErrorKind::UnterminatedString => {
                write!(f, "unterminated string starting at offset {}", self.offset)
            }
        }
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// Parser
// =============================================================================

/// A JSON parser bound to an input buffer and an arena.
///
/// The returned nodes borrow the arena; the views inside them borrow the
/// input. Both must outlive any use of the tree, which the lifetimes
/// enforce.
pub struct Parser<'a> {
    input: &'a [u8],
    cursor: usize,
    arena: &'a Arena,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8], arena: &'a Arena) -> Parser<'a> {
        debug!(input_len = input.len(), "starting JSON parse");
        Parser {
            input,
            cursor: 0,
            arena,
        }
    }

    /// Parses one JSON value and returns its root node.
    ///
    /// Bytes after the first top-level value are left unconsumed. On error
    /// the arena retains whatever nodes were already built; callers discard
    /// them with [`Arena::reset`].
    pub fn parse_any(&mut self) -> Result<&'a Node<'a>, ParseError> {
        match self.peek_next() {
            Some(b'"') => self.parse_string(),
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b't') | Some(b'f') | Some(b'n') => self.parse_literal(),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(),
            Some(byte) => Err(self.unexpected(byte)),
            None => Err(self.eof()),
        }
    }

    /// Skips whitespace and returns the upcoming byte without consuming it.
    #[inline]
    fn peek_next(&mut self) -> Option<u8> {
        self.cursor = swar::skip_whitespace(self.input, self.cursor);
        self.input.get(self.cursor).copied()
    }

    /// Consumes `literal` if the input matches it byte for byte.
    fn eat(&mut self, literal: &'static [u8]) -> bool {
        if self.input[self.cursor..].starts_with(literal) {
            self.cursor += literal.len();
            true
        } else {
            false
        }
    }

    fn parse_literal(&mut self) -> Result<&'a Node<'a>, ParseError> {
        let start = self.cursor;
        let (ty, text): (NodeType, &'static [u8]) = match self.input[start] {
            b't' => (NodeType::True, b"true"),
            b'f' => (NodeType::False, b"false"),
            _ => (NodeType::Null, b"null"),
        };
        if !self.eat(text) {
            return Err(ParseError::new(ParseErrorKind::BadLiteral, start));
        }
        Ok(self.arena.alloc(Node::new(ty, text)))
    }

    fn parse_number(&mut self) -> Result<&'a Node<'a>, ParseError> {
        let start = self.cursor;
        let mut pos = start;
        // Digit runs go through the SWAR skip; the sign byte is handled in
        // the tail. Only `-` and `0..9` belong to a number here.
        loop {
            pos = swar::skip_digits(self.input, pos);
            if pos < self.input.len() && self.input[pos] == b'-' {
                pos += 1;
            } else {
                break;
            }
        }
        self.cursor = pos;
        Ok(self
            .arena
            .alloc(Node::new(NodeType::Number, &self.input[start..pos])))
    }

    /// Scans a string at the cursor (which must sit on the opening quote)
    /// and returns the content view, with the cursor advanced past the
    /// closing quote.
    fn parse_string_view(&mut self) -> Result<&'a [u8], ParseError> {
        let quote = self.cursor;
        self.cursor += 1;
        let start = self.cursor;
        let Some((len, _saw_escape)) = swar::string_end(self.input, start) else {
            return Err(ParseError::new(ParseErrorKind::UnterminatedString, quote));
        };
        self.cursor = start + len + 1;
        Ok(&self.input[start..start + len])
    }

    fn parse_string(&mut self) -> Result<&'a Node<'a>, ParseError> {
        let view = self.parse_string_view()?;
        Ok(self.arena.alloc(Node::new(NodeType::String, view)))
    }

    fn parse_object(&mut self) -> Result<&'a Node<'a>, ParseError> {
        self.cursor += 1; // past '{'

        if self.peek_next() == Some(b'}') {
            self.cursor += 1;
            return Ok(self.arena.alloc(Node::new(NodeType::Object, &[])));
        }

        let object: &'a Node<'a> = self.arena.alloc(Node::new(NodeType::Object, &[]));
        let mut tail: Option<&'a Node<'a>> = None;

        loop {
            match self.peek_next() {
                Some(b'"') => {}
                Some(byte) => return Err(self.unexpected(byte)),
                None => return Err(self.eof()),
            }
            // Keys allocate no node; the view is stored on the value node.
            let key = self.parse_string_view()?;

            match self.peek_next() {
                Some(b':') => self.cursor += 1,
                Some(byte) => return Err(self.unexpected(byte)),
                None => return Err(self.eof()),
            }

            let value = self.parse_any()?;
            value.set_key(key);
            match tail {
                None => object.set_first_child(value),
                Some(previous) => previous.set_next_sibling(value),
            }
            tail = Some(value);

            match self.peek_next() {
                Some(b',') => self.cursor += 1,
                Some(b'}') => {
                    self.cursor += 1;
                    break;
                }
                Some(byte) => return Err(self.unexpected(byte)),
                None => return Err(self.eof()),
            }
        }

        Ok(object)
    }

    fn parse_array(&mut self) -> Result<&'a Node<'a>, ParseError> {
        self.cursor += 1; // past '['

        if self.peek_next() == Some(b']') {
            self.cursor += 1;
            return Ok(self.arena.alloc(Node::new(NodeType::Array, &[])));
        }

        let array: &'a Node<'a> = self.arena.alloc(Node::new(NodeType::Array, &[]));
        let mut tail: Option<&'a Node<'a>> = None;

        loop {
            let element = self.parse_any()?;
            match tail {
                None => array.set_first_child(element),
                Some(previous) => previous.set_next_sibling(element),
            }
            tail = Some(element);

            match self.peek_next() {
                Some(b',') => self.cursor += 1,
                Some(b']') => {
                    self.cursor += 1;
                    break;
                }
                Some(byte) => return Err(self.unexpected(byte)),
                None => return Err(self.eof()),
            }
        }

        Ok(array)
    }

    fn unexpected(&self, byte: u8) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedByte(byte), self.cursor)
    }

    fn eof(&self) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedEof, self.cursor)
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
