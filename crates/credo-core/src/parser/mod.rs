//! Statement list tokenizer
//!
//! Reads the two literal statement forms used to seed knowledge bases.
//!
//! # Grammar
//!
//! ```text
//! list  ::= [ tuple ("," tuple)* ]
//! tuple ::= "(" NODE "," NODE ["," NODE] ")"
//! ```
//!
//! Pairs `(a,b)` get the implicit reporter `_`. The weighted form
//! `(a,b,0.8)` reads the third field as a support value instead.
//!
//! # Example
//!
//! ```rust
//! use credo_core::parser::parse_statements;
//!
//! let statements = parse_statements("(A1,A2,F1), (A2,A4)").unwrap();
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[1].reporter.as_str(), "_");
//! ```

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use thiserror::Error;

use crate::statement::{Node, Statement, WeightedStatement, IMPLICIT_REPORTER};

/// Parser errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected} at position {position}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("tuple at position {position} has {count} fields, expected {expected}")]
    WrongArity {
        count: usize,
        expected: String,
        position: usize,
    },

    #[error("invalid support value '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("invalid node identifier at position {position}")]
    InvalidNode { position: usize },
}

/// One parenthesised tuple before interpretation
struct RawTuple<'a> {
    position: usize,
    fields: Vec<Token<'a>>,
}

/// Statement list parser
pub struct Parser<'a> {
    lexer: std::iter::Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input).peekable(),
        }
    }

    fn next_token(&mut self) -> Token<'a> {
        self.lexer.next().unwrap_or_else(|| Token::eof(0))
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        let token = self.next_token();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(&kind.to_string(), &token))
        }
    }

    fn tuple(&mut self) -> Result<RawTuple<'a>, ParseError> {
        let open = self.expect(TokenKind::OpenParen)?;
        let mut fields = vec![self.expect(TokenKind::Node)?];

        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::Comma => fields.push(self.expect(TokenKind::Node)?),
                TokenKind::CloseParen => break,
                _ => return Err(unexpected("',' or ')'", &token)),
            }
        }

        Ok(RawTuple {
            position: open.position,
            fields,
        })
    }

    fn tuples(mut self) -> Result<Vec<RawTuple<'a>>, ParseError> {
        let mut tuples = Vec::new();
        if self.peek_kind() == TokenKind::Eof {
            return Ok(tuples);
        }

        loop {
            tuples.push(self.tuple()?);
            let token = self.next_token();
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::Eof => break,
                _ => return Err(unexpected("',' or end of input", &token)),
            }
        }

        Ok(tuples)
    }

    /// Parse `(source,target[,reporter])` tuples into statements.
    pub fn statements(self) -> Result<Vec<Statement>, ParseError> {
        self.tuples()?
            .into_iter()
            .map(|tuple| match tuple.fields.as_slice() {
                [source, target] => Ok(Statement::from_nodes(
                    node(source)?,
                    node(target)?,
                    implicit_reporter(tuple.position)?,
                )),
                [source, target, reporter] => Ok(Statement::from_nodes(
                    node(source)?,
                    node(target)?,
                    node(reporter)?,
                )),
                fields => Err(ParseError::WrongArity {
                    count: fields.len(),
                    expected: "2 or 3".to_string(),
                    position: tuple.position,
                }),
            })
            .collect()
    }

    /// Parse `(source,target,support)` tuples into weighted statements.
    pub fn weighted(self) -> Result<Vec<WeightedStatement>, ParseError> {
        self.tuples()?
            .into_iter()
            .map(|tuple| match tuple.fields.as_slice() {
                [source, target, support] => Ok(WeightedStatement {
                    source: node(source)?,
                    target: node(target)?,
                    support: number(support)?,
                }),
                fields => Err(ParseError::WrongArity {
                    count: fields.len(),
                    expected: "3".to_string(),
                    position: tuple.position,
                }),
            })
            .collect()
    }
}

fn unexpected(expected: &str, found: &Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        expected: expected.to_string(),
        found: found.describe(),
        position: found.position,
    }
}

fn node(token: &Token<'_>) -> Result<Node, ParseError> {
    Node::new(token.text).map_err(|_| ParseError::InvalidNode {
        position: token.position,
    })
}

fn implicit_reporter(position: usize) -> Result<Node, ParseError> {
    Node::new(IMPLICIT_REPORTER).map_err(|_| ParseError::InvalidNode { position })
}

fn number(token: &Token<'_>) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        text: token.text.to_string(),
        position: token.position,
    };
    let value: f64 = token.text.parse().map_err(|_| invalid())?;
    crate::statement::validate_support(value).map_err(|_| invalid())
}

/// Parse a statement list.
pub fn parse_statements(input: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::new(input).statements()
}

/// Parse a weighted statement list.
pub fn parse_weighted(input: &str) -> Result<Vec<WeightedStatement>, ParseError> {
    Parser::new(input).weighted()
}
