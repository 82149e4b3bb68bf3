//! Zero-copy lexer for statement lists

use super::token::{Token, TokenKind};

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | ',') || c.is_whitespace()
}

/// Zero-copy lexer over `(a,b)` / `(a,b,c)` lists
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            done: false,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.position += n;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
    }

    fn read_node(&mut self) -> Token<'a> {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if is_delimiter(c) {
                break;
            }
            self.advance(c.len_utf8());
        }
        Token::new(TokenKind::Node, &self.input[start..self.position], start)
    }

    fn punctuation(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.position;
        self.advance(1);
        Token::new(kind, &self.input[start..self.position], start)
    }

    fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        match self.peek_char() {
            None => Token::eof(self.position),
            Some('(') => self.punctuation(TokenKind::OpenParen),
            Some(')') => self.punctuation(TokenKind::CloseParen),
            Some(',') => self.punctuation(TokenKind::Comma),
            Some(_) => self.read_node(),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        Some(token)
    }
}
