#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod macros;
pub mod symbol_table;
pub mod type_checker;
pub mod types;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub file: Rc<String>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: Rc<String>, line: u32, column: u32) -> Self {
        Position { file, line, column }
    }

    pub fn null() -> Self {
        Position {
            file: Rc::new(String::from("<null>")),
            line: 0,
            column: 0,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub length: u32,
}

impl Span {
    pub fn new(start: Position, length: u32) -> Self {
        Span { start, length }
    }

    pub fn null() -> Self {
        Span {
            start: Position::null(),
            length: 0,
        }
    }
}

/// Returns the 1-based line of `source` that `line` points at, if it exists.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }
    source.lines().nth((line - 1) as usize)
}

/// Renders a diagnostic against the source text it was reported for.
///
/// ```text
/// Error: TypeMismatch (Expected argument type `int`, received `float`)
/// -> main.fx:3:3
///   |
/// 3 | f(3.14);
///   | --^^^^
/// ```
pub fn render_diagnostic(error: &Error, source: &str) -> String {
    let mut out = String::new();
    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position));

    let line_text = match get_line(source, position.line) {
        Some(text) => text,
        None => return out,
    };

    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

    let column = (position.column as usize).max(1);
    let dashes = column.saturating_sub(removed_whitespace + 1);
    let carets = (error.get_span().length as usize).max(1);
    out.push_str(&format!(
        "{:>padding$} {}{}\n",
        "|",
        "-".repeat(dashes),
        "^".repeat(carets)
    ));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position, Span,
    };

    #[test]
    fn test_get_line() {
        let source = "Hello, world!\nsecond\n\nTesting { }\n";
        assert_eq!(super::get_line(source, 1), Some("Hello, world!"));
        assert_eq!(super::get_line(source, 4), Some("Testing { }"));
        assert_eq!(super::get_line(source, 0), None);
        assert_eq!(super::get_line(source, 9), None);
    }

    #[test]
    fn test_render_diagnostic() {
        let source = "def main() -> int {\n    f(3.14);\n};\n";
        let error = Error::new(
            ErrorImpl::ArgumentTypeMismatch {
                expected: "int".to_string(),
                received: "float".to_string(),
            },
            Span::new(Position::new(Rc::new("main.fx".to_string()), 2, 7), 4),
        );

        let rendered = super::render_diagnostic(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines[0],
            "Error: TypeMismatch (Expected argument type `int`, received `float`)"
        );
        assert_eq!(lines[1], "-> main.fx:2:7");
        assert_eq!(lines[3], "2 | f(3.14);");
        assert_eq!(lines[4], "  | --^^^^");
    }

    #[test]
    fn test_render_diagnostic_without_source_line() {
        let error = Error::new(ErrorImpl::MissingEntryPoint { name: "main".to_string() }, Span::null());
        let rendered = super::render_diagnostic(&error, "");
        assert_eq!(rendered.lines().count(), 2);
    }
}
