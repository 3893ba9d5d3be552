//! UraniumLang lexer: converts source text into tokens.
use std::fs;
use std::iter::FusedIterator;
use std::path::Path;

use tracing::{debug, trace};
use ulang_syntax::error::{lex_failure, Error, ErrorKind, Result};
use ulang_syntax::token::{Token, TokenKind};


/// Streaming character scanner that produces tokens with 1-based positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Read the whole file into memory and lex it.
    ///
    /// The file is closed before the first token is produced.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            Error::new(
                ErrorKind::LexFailure,
                format!("Failed to read file \"{}\": {}", path.display(), e),
            )
        })?;
        // Invalid UTF-8 becomes U+FFFD; only literals can carry it through.
        let src = String::from_utf8_lossy(&bytes);
        debug!(path = %path.display(), chars = src.len(), "loaded source file");
        Ok(Self::new(&src))
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Digits and dots, unvalidated: `1.2.3` is a single token.
    fn read_number(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::with_text(TokenKind::Int, s, line, col)
    }

    fn read_ident(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::with_text(TokenKind::Ident, s, line, col)
    }

    /// Called with the opening quote already consumed. No escape processing.
    fn read_string(&mut self, line: usize, col: usize) -> Result<Token> {
        let mut s = String::new();
        while let Some(c) = self.advance() {
            if c == '"' {
                return Ok(Token::with_text(TokenKind::Str, s, line, col));
            }
            s.push(c);
        }
        lex_failure(line, col, "Unterminated string")
    }

    /// Called with the opening quote already consumed. The text keeps the raw
    /// spelling, so `'\n'` yields the two characters `\` and `n`.
    fn read_char(&mut self, line: usize, col: usize) -> Result<Token> {
        let mut s = String::new();
        match self.advance() {
            None => return lex_failure(line, col, "Unterminated character literal"),
            Some('\'') => return lex_failure(line, col, "Empty character literal"),
            Some('\\') => {
                s.push('\\');
                match self.advance() {
                    Some(esc) => s.push(esc),
                    None => return lex_failure(line, col, "Unterminated character literal"),
                }
            }
            Some(c) => s.push(c),
        }
        match self.peek() {
            Some('\'') => {
                self.advance();
                Ok(Token::with_text(TokenKind::Char, s, line, col))
            }
            Some(other) => lex_failure(
                self.line,
                self.col,
                format!("Unexpected character '{}', expected `'`", other),
            ),
            None => lex_failure(line, col, "Unterminated character literal"),
        }
    }

    /// Produce the next token.
    ///
    /// At end of input this returns `Eof`, and keeps returning it on every
    /// further call.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        let line = self.line;
        let col = self.col;
        let tok = match self.peek() {
            None => Token::new(TokenKind::Eof, line, col),
            Some(c) if c.is_ascii_digit() => self.read_number(line, col),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.read_ident(line, col),
            Some('"') => {
                self.advance();
                self.read_string(line, col)?
            }
            Some('\'') => {
                self.advance();
                self.read_char(line, col)?
            }
            Some(c) => match TokenKind::from_punct(c) {
                Some(kind) => {
                    self.advance();
                    Token::new(kind, line, col)
                }
                None => {
                    return lex_failure(line, col, format!("Unexpected character '{}'", c));
                }
            },
        };
        trace!(kind = ?tok.kind, line, col, "token");
        Ok(tok)
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let done = tok.is(TokenKind::Eof);
            tokens.push(tok);
            if done {
                break;
            }
        }
        debug!(count = tokens.len(), "tokenized input");
        Ok(tokens)
    }

    /// Lazy, single-pass view over the remaining tokens.
    ///
    /// The iterator ends at `Eof` (which it does not yield) or right after
    /// yielding the first error.
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens {
            lexer: self,
            done: false,
        }
    }
}

/// Iterator returned by [`Lexer::tokens`].
pub struct Tokens<'a> {
    lexer: &'a mut Lexer,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lexer.next_token() {
            Ok(tok) if tok.is(TokenKind::Eof) => {
                self.done = true;
                None
            }
            Ok(tok) => Some(Ok(tok)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}
