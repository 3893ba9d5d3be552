//! AST (abstract syntax tree) types for UraniumLang.
//!
//! The tree is a closed set of enums. Every node owns its children, and
//! [`Program`] is the single root that owns the statement list.
//!
//! Every node implements `Display` as a fully parenthesized prefix form, which
//! makes the shape of a parse easy to read:
//!
//! ```text
//! 2 + 3 * 4;       =>  (+ 2 (* 3 4))
//! int x = 5;       =>  (var int x 5)
//! a = b = 1;       =>  (= a (= b 1))
//! ```

use std::fmt;

use serde::Serialize;

use crate::token::{Token, TokenKind};

/// Expressions. An expression may also stand alone as a statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Identifier {
        name: String,
    },
    NumberLiteral(Token),
    StringLiteral(Token),
    CharLiteral(Token),
    Binary {
        left: Box<Expr>,
        op: TokenKind,
        right: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
}

impl Expr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn binary(left: Expr, op: TokenKind, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assignment(target: Expr, value: Expr) -> Self {
        Expr::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }
}

/// The declared type of a variable: one or more type-keyword tokens,
/// e.g. `int` or `const int`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TypeRef(Vec<Token>);

impl TypeRef {
    /// Returns `None` for an empty token list; a type always has at least one keyword.
    pub fn new(tokens: Vec<Token>) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(TypeRef(tokens))
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    /// The keyword spellings in source order.
    pub fn spellings(&self) -> Vec<&str> {
        self.0.iter().map(Token::text).collect()
    }
}

/// A variable declaration: `TypeRef name ('=' init)? ;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarDecl {
    pub types: TypeRef,
    pub name: Token,
    pub init: Option<Expr>,
}

impl VarDecl {
    /// A declaration without an initializer. The initializer, if any, is
    /// attached afterwards with [`VarDecl::set_init`].
    pub fn new(types: TypeRef, name: Token) -> Self {
        Self {
            types,
            name,
            init: None,
        }
    }

    pub fn set_init(&mut self, init: Expr) {
        self.init = Some(init);
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }
}

/// Statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VarDecl(VarDecl),
    Expr(Expr),
}

/// Entire program: the root of the tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name } => write!(f, "{}", name),
            Expr::NumberLiteral(tok) | Expr::StringLiteral(tok) | Expr::CharLiteral(tok) => {
                write!(f, "{}", tok)
            }
            Expr::Binary { left, op, right } => {
                let sym = op.symbol().unwrap_or("?");
                write!(f, "({} {} {})", sym, left, right)
            }
            Expr::Assignment { target, value } => write!(f, "(= {} {})", target, value),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spellings().join(" "))
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl(decl) => {
                write!(f, "(var {} {}", decl.types, decl.name())?;
                if let Some(init) = &decl.init {
                    write!(f, " {}", init)?;
                }
                write!(f, ")")
            }
            Stmt::Expr(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
