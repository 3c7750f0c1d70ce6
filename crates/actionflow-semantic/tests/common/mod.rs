use actionflow_semantic::Compilation;
use actionflow_syntax::{DiagnosticCode, highlight};

/// Sorted diagnostics, each followed by the offending line with carets.
pub fn render_diagnostics(text: &str) -> String {
    let compilation = Compilation::new(text);
    let mut output = String::new();

    for diagnostic in compilation.sorted_diagnostics() {
        output.push_str(&diagnostic.to_string());
        output.push('\n');
        output.push_str(&highlight(text, diagnostic.span, 0));
    }

    output
}

pub fn codes(text: &str) -> Vec<DiagnosticCode> {
    Compilation::new(text)
        .sorted_diagnostics()
        .iter()
        .map(|d| d.code)
        .collect()
}
