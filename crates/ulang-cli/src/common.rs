use std::fmt::Display;

use owo_colors::OwoColorize;
use ulang_syntax::error::{Error, ErrorKind};

/// Print `msg` as a driver error and exit with status 1.
pub fn fail(msg: impl Display) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.to_string().red());
    std::process::exit(1)
}

/// Print a front-end error with the offending source line and a caret.
pub fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line.saturating_sub(1)) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }
    provide_error_suggestions(err);
}

pub fn provide_error_suggestions(err: &Error) {
    let msg = err.msg.as_str();
    match err.kind {
        ErrorKind::LexFailure => {
            if msg.contains("Unterminated string") {
                eprintln!("{}", "Help: String is missing closing quote.".yellow());
                eprintln!("    {}", "Make sure every \" has a matching closing \"".bright_black());
            } else if msg.contains("character literal") || msg.contains("expected `'`") {
                eprintln!("{}", "Help: Character literals hold exactly one character.".yellow());
                eprintln!("    {}", "Example: char c = 'a'; or char nl = '\\n';".bright_black());
            } else if msg.contains("Unexpected character") {
                eprintln!("{}", "Help: This character is not part of the language.".yellow());
                eprintln!(
                    "    {}",
                    "Allowed symbols: ( ) { } [ ] < > ; : = + - * / ! ?".bright_black()
                );
            }
        }
        ErrorKind::UnexpectedToken => {
            if msg.starts_with("Expected ';'") {
                eprintln!("{}", "Help: Every statement ends with ';'.".yellow());
                eprintln!("    {}", "Example: int x = 5;".bright_black());
            } else if msg.starts_with("Expected identifier") {
                eprintln!("{}", "Help: A declaration needs a variable name after its type.".yellow());
                eprintln!("    {}", "Example: double ratio;".bright_black());
            } else if msg.starts_with("Expected ')'") {
                eprintln!("{}", "Help: Check if parentheses are balanced.".yellow());
            }
        }
        ErrorKind::Failed => {
            if msg.contains("Expected a type") {
                eprintln!("{}", "Help: Known types are int, double, char and const.".yellow());
            }
        }
        ErrorKind::NotImplemented => {
            eprintln!("{}", "Help: This construct is reserved but not supported yet.".yellow());
        }
    }
}
