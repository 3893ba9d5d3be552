//! Token definitions for the UraniumLang front end.
//!
//! Tokens are the smallest meaningful units of source text. The lexer produces
//! them and the parser consumes them by value.
//!
//! # Token Categories
//!
//! - **Words**: identifiers, which also cover type keywords (`int`, `x`)
//! - **Literals**: numbers, strings and characters (`42`, `"hi"`, `'a'`)
//! - **Punctuation**: single-character symbols (`(`, `;`, `+`, `?`)
//! - **Special**: the end-of-file marker
//!
//! # Examples
//!
//! ```rust
//! use ulang_syntax::{Token, TokenKind};
//!
//! let semi = Token::new(TokenKind::Semi, 1, 10);
//! assert!(semi.text.is_none());
//!
//! let name = Token::with_text(TokenKind::Ident, "counter", 1, 5);
//! assert_eq!(name.text(), "counter");
//! ```

use std::fmt;

use serde::Serialize;

/// The kind of a lexical unit.
///
/// The enumeration is closed and carries no payload; the spelling of
/// identifiers and literals lives in [`Token::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // === Words and literals ===
    /// An identifier or type keyword (`x`, `int`)
    Ident,

    /// A numeric literal (`42`, `3.14`)
    Int,

    /// A string literal (`"hello"`)
    Str,

    /// A character literal (`'a'`, `'\n'`)
    Char,

    // === Punctuation ===
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `;`
    Semi,
    /// `:`
    Colon,
    /// `=`
    Equal,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `!`
    Bang,
    /// `?`
    Question,

    /// End-of-file marker - indicates no more tokens
    Eof,
}

impl TokenKind {
    /// Maps a single punctuation character to its kind.
    pub fn from_punct(c: char) -> Option<TokenKind> {
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            ';' => TokenKind::Semi,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equal,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '!' => TokenKind::Bang,
            '?' => TokenKind::Question,
            _ => return None,
        };
        Some(kind)
    }

    /// The source spelling of a punctuation kind, `None` for everything else.
    pub fn symbol(self) -> Option<&'static str> {
        let s = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Semi => ";",
            TokenKind::Colon => ":",
            TokenKind::Equal => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::Question => "?",
            TokenKind::Ident | TokenKind::Int | TokenKind::Str | TokenKind::Char | TokenKind::Eof => {
                return None
            }
        };
        Some(s)
    }

    /// Whether tokens of this kind carry a `text` payload.
    pub fn has_text(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Int | TokenKind::Str | TokenKind::Char
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Int => write!(f, "integer literal"),
            TokenKind::Str => write!(f, "string literal"),
            TokenKind::Char => write!(f, "character literal"),
            TokenKind::Eof => write!(f, "end of file"),
            other => match other.symbol() {
                Some(s) => write!(f, "'{}'", s),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

/// A token with its source location information.
///
/// # Fields
///
/// - `kind`: The syntactic category of the token
/// - `text`: Spelling for identifiers and literals, `None` for punctuation and Eof
/// - `line`: 1-based line number in the source
/// - `col`: 1-based column number of the token's first character
///
/// # Usage in Error Reporting
///
/// The position is what lets the driver point at the offending token:
///
/// ```text
/// Parse error: Expected ';', found integer literal `5` at 1:7
///   1 | int x 5;
///             ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The type of this token
    pub kind: TokenKind,

    /// Spelling of identifiers and literals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Line number in the source (1-based)
    pub line: usize,

    /// Column number in the source (1-based)
    pub col: usize,
}

impl Token {
    /// Creates a token without a text payload.
    pub fn new(kind: TokenKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: None,
            line,
            col,
        }
    }

    /// Creates a token carrying its source spelling.
    pub fn with_text(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            line,
            col,
        }
    }

    /// The token's spelling, or the empty string when it has none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Renders the token for diagnostics, e.g. ``identifier `x` `` or `';'`.
    pub fn describe(&self) -> String {
        match &self.text {
            Some(t) if self.kind == TokenKind::Str => format!("{} \"{}\"", self.kind, t),
            Some(t) => format!("{} `{}`", self.kind, t),
            None => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind.symbol(), &self.text) {
            (Some(sym), _) => write!(f, "{}", sym),
            (None, Some(t)) => match self.kind {
                TokenKind::Str => write!(f, "\"{}\"", t),
                TokenKind::Char => write!(f, "'{}'", t),
                _ => write!(f, "{}", t),
            },
            (None, None) => write!(f, "<eof>"),
        }
    }
}
