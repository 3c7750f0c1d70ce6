use actionflow_semantic::Compilation;
use actionflow_syntax::{Severity, Span};
use tower_lsp::Client;
use tower_lsp::lsp_types::*;

/// LSP positions and ours are both zero-based with UTF-16 columns.
pub fn to_lsp_position(position: actionflow_syntax::Position) -> Position {
    Position {
        line: position.line as u32,
        character: position.column as u32,
    }
}

pub fn from_lsp_position(position: Position) -> actionflow_syntax::Position {
    actionflow_syntax::Position::new(position.line as usize, position.character as usize)
}

pub fn span_to_range(span: Span) -> Range {
    Range {
        start: to_lsp_position(span.start),
        end: to_lsp_position(span.end),
    }
}

pub fn to_lsp_diagnostic(diagnostic: &actionflow_syntax::Diagnostic) -> Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: span_to_range(diagnostic.span),
        severity: Some(severity),
        code: Some(NumberOrString::String(diagnostic.code.to_string())),
        code_description: None,
        source: Some("actionflow".to_string()),
        message: diagnostic.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

/// All diagnostics of a compilation, ordered by position.
pub fn get_diagnostics(compilation: &Compilation) -> Vec<Diagnostic> {
    compilation
        .sorted_diagnostics()
        .into_iter()
        .map(to_lsp_diagnostic)
        .collect()
}

/// Publish diagnostics to the client
pub async fn publish_diagnostics(client: &Client, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
    client.publish_diagnostics(uri, diagnostics, version).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_conversion() {
        let compilation = Compilation::new("action \"a\" {\n  uses = \"ci\"\n}");
        let diagnostics = get_diagnostics(&compilation);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.code, Some(NumberOrString::String("E025".to_string())));
        assert_eq!(diagnostic.source.as_deref(), Some("actionflow"));
        assert_eq!(
            diagnostic.range,
            Range {
                start: Position { line: 1, character: 9 },
                end: Position { line: 1, character: 13 },
            }
        );
    }

    #[test]
    fn test_warnings_keep_their_severity() {
        let compilation = Compilation::new("action \"a\" { uses = \"./a\" secrets = [\"S\", \"S\"] }");
        let diagnostics = get_diagnostics(&compilation);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::WARNING));
    }
}
