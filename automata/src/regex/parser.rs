//! Recursive-descent parser for path patterns.
//!
//! ```text
//! union   := concat ('|' concat)*
//! concat  := postfix ('.'? postfix)*
//! postfix := atom ('*' | '?')*
//! atom    := SYMBOL | '$' | '(' union ')'
//! ```

use super::ast::Regex;
use super::error::{ParseError, ParseResult};
use super::lexer::{Lexer, Token, TokenKind};

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Self {
            tokens: Lexer::new(input).tokenize(),
            pos: 0,
        }
    }

    /// Parse a complete pattern. Empty input is rejected; `$` spells the
    /// empty word.
    pub fn parse(mut self) -> ParseResult<Regex> {
        if self.check(&TokenKind::Eof) {
            return Err(ParseError::new("empty pattern", self.peek().span)
                .with_expected(vec!["symbol".to_string(), "'$'".to_string()]));
        }
        let regex = self.parse_union()?;
        self.expect(&TokenKind::Eof)?;
        Ok(regex)
    }

    // ==================== TOKEN HELPERS ====================

    fn peek(&self) -> &Token {
        // The lexer always emits a trailing Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            Err(ParseError::unexpected_eof(token.span, kind.name()))
        } else {
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    // ==================== GRAMMAR ====================

    fn parse_union(&mut self) -> ParseResult<Regex> {
        let mut regex = self.parse_concat()?;
        while self.check(&TokenKind::Pipe) {
            self.advance();
            regex = regex.union(self.parse_concat()?);
        }
        Ok(regex)
    }

    fn parse_concat(&mut self) -> ParseResult<Regex> {
        let mut regex = self.parse_postfix()?;
        loop {
            if self.check(&TokenKind::Dot) {
                self.advance();
            } else if !self.peek().kind.starts_operand() {
                break;
            }
            regex = regex.concat(self.parse_postfix()?);
        }
        Ok(regex)
    }

    fn parse_postfix(&mut self) -> ParseResult<Regex> {
        let mut regex = self.parse_atom()?;
        loop {
            match self.peek().kind {
                TokenKind::Star => regex = regex.star(),
                TokenKind::Question => regex = regex.optional(),
                _ => break,
            }
            self.advance();
        }
        Ok(regex)
    }

    fn parse_atom(&mut self) -> ParseResult<Regex> {
        let token = self.advance();
        match token.kind {
            TokenKind::Symbol(text) => Ok(Regex::symbol(text)),
            TokenKind::Epsilon => Ok(Regex::Epsilon),
            TokenKind::LParen => {
                let inner = self.parse_union()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(ParseError::unexpected_eof(token.span, "operand")),
            other => Err(ParseError::unexpected_token(
                token.span,
                "operand",
                other.name(),
            )),
        }
    }
}

/// Parse pattern text into a syntax tree.
pub fn parse_regex(input: &str) -> ParseResult<Regex> {
    Parser::new(input).parse()
}
