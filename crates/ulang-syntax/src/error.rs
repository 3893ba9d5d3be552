//! Error handling types for the UraniumLang front end.
//!
//! Every fallible operation in the lexer and the parser returns [`Result`].
//! Nothing in the front end panics on bad input: the first failure is carried
//! back to the caller as an [`Error`] and propagated with `?`.
//!
//! # Error Philosophy
//!
//! - **Classified**: every error has an [`ErrorKind`] so callers can branch on it
//! - **Located**: lexing and parsing errors carry 1-based line and column
//! - **First failure wins**: there is no recovery, the first error aborts the parse
//!
//! # Examples
//!
//! ```rust
//! use ulang_syntax::error::{ErrorKind, Result, error_at};
//!
//! fn check_digit(c: char, line: usize, col: usize) -> Result<u32> {
//!     match c.to_digit(10) {
//!         Some(d) => Ok(d),
//!         None => error_at(ErrorKind::LexFailure, line, col, format!("Unexpected character '{}'", c)),
//!     }
//! }
//!
//! let err = check_digit('x', 2, 4).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::LexFailure);
//! assert_eq!(err.to_string(), "Unexpected character 'x' at 2:4");
//! ```

use thiserror::Error;

use crate::token::Token;

/// Classification of front-end failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// A grammar production that is reserved but not supported yet.
    #[error("not implemented")]
    NotImplemented,

    /// Malformed literal, unterminated string/char or unrecognized character.
    #[error("lex failure")]
    LexFailure,

    /// The parser expected one token and found another.
    #[error("unexpected token")]
    UnexpectedToken,

    /// Generic parse-level failure, such as a missing type.
    #[error("failed")]
    Failed,
}

/// An error that occurred while lexing or parsing.
///
/// Errors are plain values: cheap to clone and compare.
///
/// # Fields
///
/// - `kind`: What class of failure this is
/// - `msg`: Human-readable description
/// - `line`: Optional 1-based line number in the source
/// - `col`: Optional 1-based column number in the source
///
/// # Examples
///
/// ```rust
/// use ulang_syntax::{Error, ErrorKind};
///
/// let err = Error::with_span(ErrorKind::UnexpectedToken, "Expected ';', found end of file", 3, 1);
/// assert_eq!(err.to_string(), "Expected ';', found end of file at 3:1");
///
/// let err = Error::new(ErrorKind::Failed, "Failed to read file");
/// assert_eq!(err.to_string(), "Failed to read file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}{}", location_suffix(.line, .col))]
pub struct Error {
    /// Classification of the failure
    pub kind: ErrorKind,

    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

fn location_suffix(line: &Option<usize>, col: &Option<usize>) -> String {
    match (line, col) {
        (Some(l), Some(c)) => format!(" at {}:{}", l, c),
        _ => String::new(),
    }
}

impl Error {
    /// Creates an error without source location information.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates an error pointing at a 1-based line and column.
    pub fn with_span(kind: ErrorKind, msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line: Some(line),
            col: Some(col),
        }
    }

    /// Whether the error carries a source position.
    pub fn has_span(&self) -> bool {
        self.line.is_some() && self.col.is_some()
    }
}

/// A specialized `Result` type for front-end operations.
///
/// Reading the value out of an `Err` is never silent: `?` propagates the
/// error and `unwrap` panics.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::new(kind, msg))`.
pub fn error<T>(kind: ErrorKind, msg: impl Into<String>) -> Result<T> {
    Err(Error::new(kind, msg))
}

/// Shorthand for `Err(Error::with_span(kind, msg, line, col))`.
pub fn error_at<T>(kind: ErrorKind, line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(kind, msg, line, col))
}

/// A [`ErrorKind::LexFailure`] at the given position.
pub fn lex_failure<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    error_at(ErrorKind::LexFailure, line, col, msg)
}

/// A [`ErrorKind::UnexpectedToken`] naming what was expected and what was found.
///
/// The position is taken from the offending token.
pub fn unexpected_token<T>(expected: impl std::fmt::Display, found: &Token) -> Result<T> {
    error_at(
        ErrorKind::UnexpectedToken,
        found.line,
        found.col,
        format!("Expected {}, found {}", expected, found.describe()),
    )
}

/// A [`ErrorKind::NotImplemented`] for a reserved construct starting at `at`.
pub fn not_implemented<T>(what: &str, at: &Token) -> Result<T> {
    error_at(
        ErrorKind::NotImplemented,
        at.line,
        at.col,
        format!("{} are not implemented yet", what),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn display_with_and_without_span() {
        let err = Error::with_span(ErrorKind::LexFailure, "Unterminated string", 1, 3);
        assert_eq!(err.to_string(), "Unterminated string at 1:3");
        assert!(err.has_span());

        let err = Error::new(ErrorKind::Failed, "no input");
        assert_eq!(err.to_string(), "no input");
        assert!(!err.has_span());
    }

    #[test]
    fn unexpected_token_names_both_sides() {
        let found = Token::with_text(TokenKind::Int, "5", 1, 7);
        let err = unexpected_token::<()>(TokenKind::Semi, &found).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.msg, "Expected ';', found integer literal `5`");
        assert_eq!((err.line, err.col), (Some(1), Some(7)));
    }

    #[test]
    fn errors_are_values() {
        let a = Error::new(ErrorKind::NotImplemented, "blocks");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(ErrorKind::NotImplemented.to_string(), "not implemented");
    }
}
