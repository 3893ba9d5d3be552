pub mod parser;

use std::path::Path;

pub use parser::{precedence, Parser, MAX_NESTING_DEPTH};
use ulang_syntax::ast::Program;
use ulang_syntax::error::Result;

/// Lex and parse `src` into a program.
pub fn parse_source(src: &str) -> Result<Program> {
    Parser::from_source(src)?.parse_program()
}

/// Read, lex and parse the file at `path`.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Program> {
    Parser::from_path(path)?.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulang_lexer::Lexer;
    use ulang_syntax::ast::*;
    use ulang_syntax::error::ErrorKind;
    use ulang_syntax::token::{Token, TokenKind};
    use ulang_syntax::types::TypeRegistry;

    fn parse_expr_str(input: &str) -> Expr {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().expect("Lexing should succeed");
        let mut parser = Parser::new(tokens);
        parser.parse_expr().expect("Parsing should succeed")
    }

    fn parse_program_str(input: &str) -> Program {
        parse_source(input).expect("Parsing should succeed")
    }

    fn parse_err(input: &str) -> ulang_syntax::Error {
        parse_source(input).expect_err("Parsing should fail")
    }

    fn only_stmt(input: &str) -> Stmt {
        let mut program = parse_program_str(input);
        assert_eq!(program.len(), 1, "Program: {}", input);
        program.statements.remove(0)
    }

    #[test]
    fn test_literal_expressions() {
        assert!(matches!(parse_expr_str("42"), Expr::NumberLiteral(t) if t.text() == "42"));
        assert!(matches!(parse_expr_str("\"hello\""), Expr::StringLiteral(t) if t.text() == "hello"));
        assert!(matches!(parse_expr_str("'c'"), Expr::CharLiteral(t) if t.text() == "c"));
    }

    #[test]
    fn test_identifier_expressions() {
        assert_eq!(parse_expr_str("variable"), Expr::identifier("variable"));
        assert_eq!(parse_expr_str("my_var"), Expr::identifier("my_var"));
    }

    #[test]
    fn test_precedence() {
        let e = parse_expr_str("2+3*4");
        assert_eq!(e.to_string(), "(+ 2 (* 3 4))");
        match e {
            Expr::Binary { left, op, right } => {
                assert_eq!(op, TokenKind::Plus);
                assert!(matches!(*left, Expr::NumberLiteral(ref t) if t.text() == "2"));
                assert!(matches!(*right, Expr::Binary { op: TokenKind::Star, .. }));
            }
            other => panic!("Expected Binary, got {:?}", other),
        }
        assert_eq!(parse_expr_str("2*3+4").to_string(), "(+ (* 2 3) 4)");
        assert_eq!(parse_expr_str("1+2*3-4").to_string(), "(- (+ 1 (* 2 3)) 4)");
        assert_eq!(parse_expr_str("a/b*c").to_string(), "(* (/ a b) c)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parse_expr_str("8-3-2").to_string(), "(- (- 8 3) 2)");
        assert_eq!(parse_expr_str("8/4/2").to_string(), "(/ (/ 8 4) 2)");
    }

    #[test]
    fn test_parenthesized_expressions() {
        assert_eq!(parse_expr_str("(2+3)*4").to_string(), "(* (+ 2 3) 4)");
        assert_eq!(parse_expr_str("8-(3-2)").to_string(), "(- 8 (- 3 2))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(parse_expr_str("a = b = 3").to_string(), "(= a (= b 3))");
        assert_eq!(parse_expr_str("x = 1 + 2").to_string(), "(= x (+ 1 2))");
    }

    #[test]
    fn test_declaration_with_initializer() {
        match only_stmt("int x = 5;") {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.types.spellings(), vec!["int"]);
                assert_eq!(decl.name(), "x");
                assert!(matches!(decl.init, Some(Expr::NumberLiteral(ref t)) if t.text() == "5"));
            }
            other => panic!("Expected VarDecl, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_without_initializer() {
        match only_stmt("int x;") {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.types.spellings(), vec!["int"]);
                assert_eq!(decl.name(), "x");
                assert!(decl.init.is_none());
            }
            other => panic!("Expected VarDecl, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_word_type() {
        let stmt = only_stmt("const double pi = 3.14;");
        assert_eq!(stmt.to_string(), "(var const double pi 3.14)");
    }

    #[test]
    fn test_expression_statement_fallback() {
        assert_eq!(only_stmt("x;"), Stmt::Expr(Expr::identifier("x")));
        assert!(matches!(only_stmt("x = 2 * y;"), Stmt::Expr(Expr::Assignment { .. })));
    }

    #[test]
    fn test_program() {
        let program = parse_program_str("int a = 1;\nchar c = 'z';\na = a + 2;\n\"done\";");
        let rendered: Vec<String> = program.statements.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["(var int a 1)", "(var char c 'z')", "(= a (+ a 2))", "\"done\""]
        );
        assert!(parse_program_str("").is_empty());
        assert!(parse_program_str("  \n ").is_empty());
    }

    #[test]
    fn test_custom_type_keywords() {
        let mut types = TypeRegistry::builtin();
        types.register("unsigned", "unsigned");
        types.register("long", "long");
        let tokens = Lexer::new("unsigned long n = 7;").tokenize().unwrap();
        let program = Parser::with_types(tokens, types).parse_program().unwrap();
        assert_eq!(program.to_string(), "(var unsigned long n 7)\n");

        // Without the registration `unsigned` is an ordinary identifier.
        let err = parse_err("unsigned long n = 7;");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_missing_semicolon_after_name() {
        let err = parse_err("int x 5;");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.msg, "Expected ';', found integer literal `5`");
        assert_eq!((err.line, err.col), (Some(1), Some(7)));
        assert_eq!(err.to_string(), "Expected ';', found integer literal `5` at 1:7");
    }

    #[test]
    fn test_missing_semicolon_at_eof() {
        let err = parse_err("x = 1\n");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.msg, "Expected ';', found end of file");
        assert_eq!((err.line, err.col), (Some(2), Some(1)));
    }

    #[test]
    fn test_unexpected_token_in_expression() {
        let err = parse_err("int x = ;");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert_eq!(err.msg, "Expected an expression, found ';'");
        assert_eq!((err.line, err.col), (Some(1), Some(9)));

        let err = parse_err("(1 + 2;");
        assert_eq!(err.msg, "Expected ')', found ';'");
    }

    #[test]
    fn test_first_error_wins() {
        // Two bad statements: only the first is reported.
        let err = parse_err("int = 1;\n* 2;");
        assert_eq!(err.msg, "Expected identifier, found '='");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_lex_errors_surface_unchanged() {
        let err = parse_err("int s = \"abc");
        assert_eq!(err.kind, ErrorKind::LexFailure);
        assert_eq!(err.msg, "Unterminated string");
    }

    #[test]
    fn test_blocks_not_implemented() {
        let err = parse_err("{ x; }");
        assert_eq!(err.kind, ErrorKind::NotImplemented);
        assert_eq!((err.line, err.col), (Some(1), Some(1)));
    }

    #[test]
    fn test_parse_type_ref() {
        let mut parser = Parser::from_source("const int x").unwrap();
        let types = parser.parse_type_ref().unwrap();
        assert_eq!(types.spellings(), vec!["const", "int"]);
        assert_eq!(parser.current().text(), "x");

        let err = parser.parse_type_ref().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Failed);
        assert_eq!(err.msg, "Expected a type, found identifier `x`");
    }

    #[test]
    fn test_cursor_clamps_at_eof() {
        let mut parser = Parser::from_source("a").unwrap();
        assert_eq!(parser.peek(1).kind, TokenKind::Eof);
        assert_eq!(parser.peek(100).kind, TokenKind::Eof);
        assert_eq!(parser.advance().kind, TokenKind::Ident);
        for _ in 0..3 {
            assert_eq!(parser.advance().kind, TokenKind::Eof);
        }
        assert_eq!(parser.expect(TokenKind::Eof).unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_peek_far_past_cursor() {
        let mut parser = Parser::from_source("a b").unwrap();
        parser.advance();
        assert_eq!(parser.peek(usize::MAX).kind, TokenKind::Eof);
        assert_eq!(parser.current().text(), "b");
    }

    #[test]
    fn test_nested_parens_limit() {
        let ok = format!("{}1{};", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        assert_eq!(parse_program_str(&ok).to_string(), "1\n");

        let deep = format!("{}1{};", "(".repeat(5000), ")".repeat(5000));
        let err = parse_err(&deep);
        assert_eq!(err.kind, ErrorKind::Failed);
        assert_eq!(err.msg, "Expression nesting is too deep (maximum 256 levels)");
        assert_eq!((err.line, err.col), (Some(1), Some(MAX_NESTING_DEPTH + 1)));
    }

    #[test]
    fn test_assignment_chain_limit() {
        let ok = format!("{}1;", "a = ".repeat(MAX_NESTING_DEPTH - 1));
        assert_eq!(parse_program_str(&ok).len(), 1);

        let deep = format!("{}1;", "a = ".repeat(5000));
        let err = parse_err(&deep);
        assert_eq!(err.kind, ErrorKind::Failed);
        // the 257th `=`
        assert_eq!((err.line, err.col), (Some(1), Some(1027)));
    }

    #[test]
    fn test_long_operator_chain_limit() {
        let ok = format!("1{};", "+1".repeat(MAX_NESTING_DEPTH - 1));
        assert_eq!(parse_program_str(&ok).len(), 1);

        let long = format!("x = 1{};", "+1".repeat(100_000));
        let err = parse_err(&long);
        assert_eq!(err.kind, ErrorKind::Failed);
        // the 256th `+`
        assert_eq!((err.line, err.col), (Some(1), Some(516)));
    }

    #[test]
    fn test_nested_groups_of_chains_limit() {
        // Each group adds its whole chain to the depth of the tree.
        let group = |inner: String| format!("({}+1+1+1)", inner);
        let mut src = "1".to_string();
        for _ in 0..100 {
            src = group(src);
        }
        src.push(';');
        let err = parse_err(&src);
        assert_eq!(err.kind, ErrorKind::Failed);
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let tokens = vec![
            Token::with_text(TokenKind::Ident, "x", 3, 4),
            Token::new(TokenKind::Semi, 3, 5),
        ];
        let program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(program.len(), 1);
        assert!(Parser::new(Vec::new()).parse_program().unwrap().is_empty());
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(precedence(TokenKind::Plus), 10);
        assert_eq!(precedence(TokenKind::Minus), 10);
        assert_eq!(precedence(TokenKind::Star), 20);
        assert_eq!(precedence(TokenKind::Slash), 20);
        assert_eq!(precedence(TokenKind::Semi), -1);
        assert_eq!(precedence(TokenKind::Equal), -1);
    }
}
