use actionflow_syntax::{Diagnostic, Severity, highlight};
use colored::*;

/// A diagnostic with its file location and source excerpt.
pub struct DiagnosticReport<'a> {
    pub diagnostic: &'a Diagnostic,
    pub file: Option<String>,
    pub source: Option<&'a str>,
    pub context: usize,
}

impl<'a> DiagnosticReport<'a> {
    pub fn new(diagnostic: &'a Diagnostic) -> Self {
        Self {
            diagnostic,
            file: None,
            source: None,
            context: 2,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Renders the header, the `-->` location and the excerpt. Colors
    /// follow the global `colored` override.
    pub fn render(&self) -> String {
        let diagnostic = self.diagnostic;
        let header = format!("{}[{}]:", diagnostic.severity, diagnostic.code);
        let header = match diagnostic.severity {
            Severity::Error => header.red().bold(),
            Severity::Warning => header.yellow().bold(),
        };

        let mut output = format!("{} {}\n", header, diagnostic.message.bold());

        if let Some(file) = &self.file {
            output.push_str(&format!("  {} {}:{}\n", "-->".blue().bold(), file, diagnostic.span.start));
        }

        if let Some(source) = self.source {
            for line in highlight(source, diagnostic.span, self.context).lines() {
                output.push_str(&color_excerpt_line(line));
                output.push('\n');
            }
        }

        output
    }

    pub fn display(&self) {
        eprintln!("{}", self.render());
    }
}

/// Excerpt lines are `NUM | text`, caret lines have a blank gutter.
fn color_excerpt_line(line: &str) -> String {
    let Some((gutter, rest)) = line.split_once(" | ") else {
        return line.to_string();
    };

    if gutter.trim().is_empty() {
        format!("{} {} {}", gutter, "|".blue().bold(), rest.red().bold())
    } else {
        format!("{} {} {}", gutter.blue().bold(), "|".blue().bold(), rest)
    }
}
