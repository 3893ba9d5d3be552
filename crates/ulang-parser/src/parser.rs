//! Recursive-descent statement parser with precedence climbing for binary
//! expressions.
//!
//! Grammar:
//!
//! ```text
//! Program    -> Statement* Eof
//! Statement  -> VarDecl | Expression ';'
//! VarDecl    -> TypeRef Ident ('=' Expression)? ';'
//! TypeRef    -> TypeKeyword+
//! Expression -> Assignment
//! Assignment -> Binary(0) ('=' Assignment)?
//! Binary(p)  -> Primary (Op Binary(prec(Op) + 1))*   while prec(Op) >= p
//! Primary    -> Ident | Int | Str | Char | '(' Expression ')'
//! ```
//!
//! Every method returns a [`Result`]; the first error aborts the parse.

use std::path::Path;

use tracing::{debug, trace};
use ulang_lexer::Lexer;
use ulang_syntax::ast::{Expr, Program, Stmt, TypeRef, VarDecl};
use ulang_syntax::error::{not_implemented, unexpected_token, Error, ErrorKind, Result};
use ulang_syntax::token::{Token, TokenKind};
use ulang_syntax::types::TypeRegistry;

/// Binary operators and their binding power. Higher binds tighter.
const BINARY_PRECEDENCE: &[(TokenKind, i32)] = &[
    (TokenKind::Plus, 10),
    (TokenKind::Minus, 10),
    (TokenKind::Star, 20),
    (TokenKind::Slash, 20),
];

/// Binding power of `kind`, or -1 when it is not a binary operator.
pub fn precedence(kind: TokenKind) -> i32 {
    BINARY_PRECEDENCE
        .iter()
        .find(|(k, _)| *k == kind)
        .map_or(-1, |(_, p)| *p)
}

/// Deepest expression tree, or bracket/assignment nesting, the parser accepts.
///
/// Every consumer walks the tree recursively, so depth is bounded here
/// instead of by the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// An expression together with the depth of its tree (a leaf is 1).
type Parsed = (Expr, usize);

/// Cursor over a fully materialized token vector.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    types: TypeRegistry,
    /// Open `(` groups and `=` right-hand sides currently being parsed.
    nesting_depth: usize,
}

impl Parser {
    /// Parser over `tokens` recognizing the builtin type keywords.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_types(tokens, TypeRegistry::builtin())
    }

    /// Parser over `tokens` recognizing the keywords in `types`.
    ///
    /// A trailing `Eof` is appended if the vector does not already end in one.
    pub fn with_types(mut tokens: Vec<Token>, types: TypeRegistry) -> Self {
        if !tokens.last().map_or(false, |t| t.is(TokenKind::Eof)) {
            let (line, col) = tokens.last().map_or((1, 1), |t| (t.line, t.col));
            tokens.push(Token::new(TokenKind::Eof, line, col));
        }
        Self {
            tokens,
            pos: 0,
            types,
            nesting_depth: 0,
        }
    }

    /// Lex `src` up front and build a parser over the result.
    pub fn from_source(src: &str) -> Result<Self> {
        Ok(Self::new(Lexer::new(src).tokenize()?))
    }

    /// Read and lex the file at `path` up front.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Lexer::from_path(path)?.tokenize()?))
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// The token `offset` places ahead of the cursor, clamped to the final `Eof`.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.saturating_add(offset).min(last)]
    }

    /// Returns the current token and moves past it. Never moves past `Eof`.
    pub fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    /// Consumes the current token, failing unless it is a `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let tok = self.advance();
        if tok.is(kind) {
            Ok(tok)
        } else {
            unexpected_token(kind, &tok)
        }
    }

    /// Parse statements until `Eof`.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(Program::new(statements))
    }

    /// A declaration when the statement opens with a type keyword, an
    /// expression statement otherwise.
    pub fn parse_statement(&mut self) -> Result<Stmt> {
        if self.check(TokenKind::LBrace) {
            return not_implemented("Block statements", self.current());
        }
        match TypeRef::new(self.type_keywords()) {
            Some(types) => {
                trace!(line = self.current().line, "variable declaration");
                self.parse_var_decl(types).map(Stmt::VarDecl)
            }
            None => {
                trace!(line = self.current().line, "expression statement");
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_var_decl(&mut self, types: TypeRef) -> Result<VarDecl> {
        let name = self.expect(TokenKind::Ident)?;
        let mut decl = VarDecl::new(types, name);
        if self.check(TokenKind::Equal) {
            self.advance();
            decl.set_init(self.parse_expr()?);
        }
        self.expect(TokenKind::Semi)?;
        Ok(decl)
    }

    /// Consume a non-empty run of type keywords.
    pub fn parse_type_ref(&mut self) -> Result<TypeRef> {
        let start = self.current().clone();
        TypeRef::new(self.type_keywords()).ok_or_else(|| {
            Error::with_span(
                ErrorKind::Failed,
                format!("Expected a type, found {}", start.describe()),
                start.line,
                start.col,
            )
        })
    }

    /// Consumes identifiers while they are registered type keywords. May be empty.
    fn type_keywords(&mut self) -> Vec<Token> {
        let mut keywords = Vec::new();
        while self.check(TokenKind::Ident) && self.types.contains(self.current().text()) {
            keywords.push(self.advance());
        }
        keywords
    }

    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_assignment().map(|(expr, _)| expr)
    }

    fn too_deep(at: &Token) -> Error {
        Error::with_span(
            ErrorKind::Failed,
            format!(
                "Expression nesting is too deep (maximum {} levels)",
                MAX_NESTING_DEPTH
            ),
            at.line,
            at.col,
        )
    }

    /// Pair every successful call with [`Parser::leave_nesting`].
    fn enter_nesting(&mut self, at: &Token) -> Result<()> {
        self.nesting_depth += 1;
        if self.nesting_depth > MAX_NESTING_DEPTH {
            self.nesting_depth -= 1;
            return Err(Self::too_deep(at));
        }
        Ok(())
    }

    fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Depth of a node over children of depth `left` and `right`.
    fn join_depth(left: usize, right: usize, at: &Token) -> Result<usize> {
        let depth = 1 + left.max(right);
        if depth > MAX_NESTING_DEPTH {
            return Err(Self::too_deep(at));
        }
        Ok(depth)
    }

    /// Right-associative, lowest precedence.
    fn parse_assignment(&mut self) -> Result<Parsed> {
        let (target, target_depth) = self.parse_binary(0)?;
        if self.check(TokenKind::Equal) {
            let eq = self.advance();
            self.enter_nesting(&eq)?;
            let value = self.parse_assignment();
            self.leave_nesting();
            let (value, value_depth) = value?;
            let depth = Self::join_depth(target_depth, value_depth, &eq)?;
            return Ok((Expr::assignment(target, value), depth));
        }
        Ok((target, target_depth))
    }

    fn parse_binary(&mut self, min_prec: i32) -> Result<Parsed> {
        let lhs = self.parse_primary()?;
        self.parse_binary_rhs(min_prec, lhs)
    }

    /// Folds left-associatively in a loop; only a tighter-binding operator
    /// on the right recurses.
    fn parse_binary_rhs(&mut self, min_prec: i32, lhs: Parsed) -> Result<Parsed> {
        let (mut lhs, mut lhs_depth) = lhs;
        loop {
            let prec = precedence(self.current().kind);
            if prec < min_prec {
                return Ok((lhs, lhs_depth));
            }
            let op = self.advance();
            let mut rhs = self.parse_primary()?;
            if prec < precedence(self.current().kind) {
                rhs = self.parse_binary_rhs(prec + 1, rhs)?;
            }
            let (rhs, rhs_depth) = rhs;
            lhs_depth = Self::join_depth(lhs_depth, rhs_depth, &op)?;
            lhs = Expr::binary(lhs, op.kind, rhs);
        }
    }

    fn parse_primary(&mut self) -> Result<Parsed> {
        let expr = match self.current().kind {
            TokenKind::Ident => {
                let tok = self.advance();
                Expr::identifier(tok.text())
            }
            TokenKind::Int => Expr::NumberLiteral(self.advance()),
            TokenKind::Str => Expr::StringLiteral(self.advance()),
            TokenKind::Char => Expr::CharLiteral(self.advance()),
            TokenKind::LParen => {
                let open = self.advance();
                self.enter_nesting(&open)?;
                let inner = self.parse_assignment();
                self.leave_nesting();
                let inner = inner?;
                self.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            _ => return unexpected_token("an expression", self.current()),
        };
        Ok((expr, 1))
    }
}
