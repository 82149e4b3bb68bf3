//! Token types for the statement lexer

use std::fmt;

/// Token kinds in statement lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of characters other than delimiters and whitespace
    Node,
    OpenParen,
    CloseParen,
    Comma,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Node => write!(f, "node"),
            TokenKind::OpenParen => write!(f, "'('"),
            TokenKind::CloseParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its source text and byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    /// Human-readable description used in error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Node => format!("'{}'", self.text),
            kind => kind.to_string(),
        }
    }
}
