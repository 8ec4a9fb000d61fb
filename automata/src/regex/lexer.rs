//! Lexer for path patterns.

use super::ast::Span;

/// Token types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Symbol(String),
    /// `$`, `epsilon` or `ε`
    Epsilon,

    Pipe,     // |
    Star,     // *
    Question, // ?
    Dot,      // .
    LParen,   // (
    RParen,   // )

    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Epsilon => "'$'",
            TokenKind::Pipe => "'|'",
            TokenKind::Star => "'*'",
            TokenKind::Question => "'?'",
            TokenKind::Dot => "'.'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Eof => "end of pattern",
        }
    }

    /// Whether this token can begin an operand.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Symbol(_) | TokenKind::Epsilon | TokenKind::LParen
        )
    }
}

/// A token with its span.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(pos: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            span: Span::new(pos, pos, line, column),
        }
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '|' | '*' | '?' | '(' | ')' | '.' | '$')
}

/// Lexer state.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize all input into a vector of tokens ending with `Eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn span_from(&self, start: usize, start_line: usize, start_col: usize) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let Some(c) = self.next_char() else {
            return Token::eof(self.pos, self.line, self.column);
        };

        let kind = match c {
            '|' => TokenKind::Pipe,
            '*' => TokenKind::Star,
            '?' => TokenKind::Question,
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '$' => TokenKind::Epsilon,
            _ => self.scan_symbol(c),
        };

        Token::new(kind, self.span_from(start, start_line, start_col))
    }

    fn scan_symbol(&mut self, first: char) -> TokenKind {
        let mut text = String::from(first);
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || is_operator(c) {
                break;
            }
            text.push(c);
            self.next_char();
        }
        match text.as_str() {
            "epsilon" | "ε" => TokenKind::Epsilon,
            _ => TokenKind::Symbol(text),
        }
    }
}
