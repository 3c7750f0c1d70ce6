use crate::diagnostics::{from_lsp_position, span_to_range};
use actionflow_semantic::Compilation;
use actionflow_syntax::Span;
use tower_lsp::lsp_types::*;

/// Spans naming the same declared action as the string under `position`.
pub(crate) fn reference_spans(compilation: &Compilation, position: Position, include_declaration: bool) -> Vec<Span> {
    let Some(target) = compilation.target_at(from_lsp_position(position)) else {
        return Vec::new();
    };
    let Some(symbol) = compilation.actions().get(&target.name) else {
        return Vec::new();
    };

    let mut spans = Vec::with_capacity(symbol.references.len() + 1);
    if include_declaration {
        spans.push(symbol.definition);
    }
    spans.extend(symbol.references.iter().copied());
    spans
}

pub fn find_references(
    compilation: &Compilation,
    position: Position,
    include_declaration: bool,
    uri: &Url,
) -> Vec<Location> {
    reference_spans(compilation, position, include_declaration)
        .into_iter()
        .map(|span| Location {
            uri: uri.clone(),
            range: span_to_range(span),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = r#"workflow "ci" {
  on = "push"
  resolves = "test"
}
action "build" {
  uses = "./b"
}
action "test" {
  uses = "./t"
  needs = "build"
}"#;

    fn lines(locations: &[Location]) -> Vec<u32> {
        locations.iter().map(|l| l.range.start.line).collect()
    }

    #[test]
    fn test_references_from_definition() {
        let compilation = Compilation::new(TEXT);
        let uri = Url::parse("file:///main.workflow").unwrap();

        let without = find_references(&compilation, Position { line: 7, character: 9 }, false, &uri);
        let with = find_references(&compilation, Position { line: 7, character: 9 }, true, &uri);

        assert_eq!(lines(&without), vec![2]);
        assert_eq!(lines(&with), vec![7, 2]);
    }

    #[test]
    fn test_references_from_reference() {
        let compilation = Compilation::new(TEXT);
        let uri = Url::parse("file:///main.workflow").unwrap();

        let locations = find_references(&compilation, Position { line: 9, character: 12 }, true, &uri);
        assert_eq!(lines(&locations), vec![4, 9]);
    }

    #[test]
    fn test_no_references_elsewhere() {
        let compilation = Compilation::new(TEXT);
        let uri = Url::parse("file:///main.workflow").unwrap();

        assert!(find_references(&compilation, Position { line: 1, character: 8 }, true, &uri).is_empty());
    }
}
