mod common;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser as CliParser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ulang_lexer::Lexer;
use ulang_parser::Parser;
use ulang_syntax::ast::Program;
use ulang_syntax::token::Token;

use crate::common::{fail, render_error};

#[derive(Debug, CliParser)]
#[command(name = "ulang", version, about = "Lex and parse UraniumLang source files")]
struct Cli {
    /// Source file to read
    input: PathBuf,

    /// Place the --emit output into <FILE> instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE", requires = "emit")]
    output: Option<PathBuf>,

    /// Dump the token stream or the syntax tree after a successful parse
    #[arg(long = "emit", value_enum)]
    emit: Option<Emit>,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// One token per line with its position
    Tokens,
    /// Parenthesized prefix form, one statement per line
    Ast,
    /// The syntax tree as pretty-printed JSON
    Json,
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "warn",
        1 => "ulang=debug,ulang_lexer=debug,ulang_parser=debug",
        _ => "ulang=trace,ulang_lexer=trace,ulang_parser=trace",
    }
}

fn init_tracing(verbose: u8) {
    let directive = directive_for_verbosity(verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn dump_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for t in tokens {
        out.push_str(&format!("{}:{}\t{}\n", t.line, t.col, t.describe()));
    }
    out
}

fn program_json(program: &Program) -> String {
    match serde_json::to_string_pretty(program) {
        Ok(mut s) => {
            s.push('\n');
            s
        }
        Err(e) => fail(format!("Failed to serialize syntax tree: {}", e)),
    }
}

fn write_output(output: Option<&Path>, text: &str) {
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, text) {
                fail(format!("Failed to write {}: {}", path.display(), e));
            }
            debug!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => print!("{}", text),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.input.exists() {
        fail(format!("File not found: {}", cli.input.display()));
    }
    let src = match fs::read(&cli.input) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => fail(format!("Failed to read {}: {}", cli.input.display(), e)),
    };
    debug!(path = %cli.input.display(), "read input");

    let mut lexer = Lexer::new(&src);
    let tokens = match lexer.tokenize() {
        Ok(t) => t,
        Err(e) => {
            render_error("Lex error", &src, &e);
            std::process::exit(1);
        }
    };

    if cli.emit == Some(Emit::Tokens) {
        write_output(cli.output.as_deref(), &dump_tokens(&tokens));
        return;
    }

    let mut parser = Parser::new(tokens);
    let program = match parser.parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error("Parse error", &src, &e);
            std::process::exit(1);
        }
    };
    debug!(statements = program.len(), "parsed {}", cli.input.display());

    match cli.emit {
        Some(Emit::Ast) => write_output(cli.output.as_deref(), &program.to_string()),
        Some(Emit::Json) => write_output(cli.output.as_deref(), &program_json(&program)),
        Some(Emit::Tokens) | None => {}
    }
}
