//! # actionflow-syntax
//!
//! Scanner, recovering parser, syntax tree and diagnostics for the
//! actionflow workflow language (the HCL dialect used by `main.workflow`
//! files).
//!
//! ## Architecture
//!
//! ```text
//! Source text
//!     ↓
//! Scanner (scan)          → Vec<Token>      (comments kept)
//!     ↓
//! Parser (parse)          → DocumentSyntax  (comments dropped)
//! ```
//!
//! Neither stage fails. Problems are appended to a [`DiagnosticBag`] and the
//! stages keep going, so a tree is available even for broken input.
//!
//! ## Example
//!
//! ```rust
//! use actionflow_syntax::{DiagnosticBag, parse, scan};
//!
//! let source = r#"
//!     action "build" {
//!         uses = "./ci"
//!     }
//! "#;
//!
//! let mut bag = DiagnosticBag::new();
//! let tokens = scan(source, &mut bag);
//! let document = parse(&tokens, &mut bag);
//!
//! assert_eq!(document.blocks.len(), 1);
//! assert!(bag.is_empty());
//! ```
//!
//! ## Grammar
//!
//! ```text
//! document := (version | block)*
//! version  := "version" "=" INTEGER
//! block    := ("workflow" | "action") STRING "{" property* "}"
//! property := KEY "=" (STRING | array | object)
//! array    := "[" (STRING ","?)* "]"
//! object   := "{" (IDENTIFIER "=" STRING ","?)* "}"
//! ```

pub mod diagnostics;
pub mod parser;
pub mod scanner;
pub mod syntax;

pub use diagnostics::{
    Diagnostic, DiagnosticBag, DiagnosticCode, MAXIMUM_SUPPORTED_ACTIONS, MAXIMUM_SUPPORTED_SECRETS,
    MAXIMUM_SUPPORTED_VERSION, PARSING_ERRORS_MARK, Position, Severity, Span,
};
pub use parser::parse;
pub use scanner::{Token, TokenKind, scan};
pub use syntax::*;

/// Char index inside `line` for a UTF-16 `column`.
fn char_offset(line: &str, column: usize) -> usize {
    let mut units = 0;
    for (index, ch) in line.chars().enumerate() {
        if units >= column {
            return index;
        }
        units += ch.len_utf16();
    }
    line.chars().count()
}

/// Splits on `\r\n`, lone `\r` and `\n`, the line breaks the scanner counts.
fn source_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = source;

    while let Some(index) = rest.find(['\r', '\n']) {
        lines.push(&rest[..index]);
        let width = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + width..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }

    lines
}

/// Renders the lines around `span` with carets under the highlighted text.
///
/// Line numbers are one-based and right-aligned; `context` lines are shown
/// before and after the first line of the span.
pub fn highlight(source: &str, span: Span, context: usize) -> String {
    let lines = source_lines(source);
    let line_idx = span.start.line;

    if line_idx >= lines.len() {
        return String::new();
    }

    let first = line_idx.saturating_sub(context);
    let last = (line_idx + context).min(lines.len() - 1);
    let width = (last + 1).to_string().len().max(3);

    let mut output = String::new();
    for (index, line) in lines.iter().enumerate().take(last + 1).skip(first) {
        output.push_str(&format!("{:>width$} | {}\n", index + 1, line, width = width));

        if index == line_idx {
            let start = char_offset(line, span.start.column);
            let end = if span.end.line == span.start.line {
                char_offset(line, span.end.column)
            } else {
                line.chars().count()
            };
            let carets = end.saturating_sub(start).max(1);
            output.push_str(&format!(
                "{:>width$} | {}{}\n",
                "",
                " ".repeat(start),
                "^".repeat(carets),
                width = width
            ));
        }
    }

    output
}
