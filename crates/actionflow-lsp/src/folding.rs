use actionflow_semantic::Compilation;
use actionflow_syntax::{PropertySyntax, Span};
use tower_lsp::lsp_types::*;

pub fn get_folding_ranges(compilation: &Compilation) -> Vec<FoldingRange> {
    let mut ranges = Vec::new();

    for block in &compilation.syntax().blocks {
        push_range(&mut ranges, block.span());

        for property in &block.properties {
            if !matches!(**property, PropertySyntax::String(_)) {
                push_range(&mut ranges, property.span());
            }
        }
    }

    ranges
}

/// Single-line spans have nothing to fold.
fn push_range(ranges: &mut Vec<FoldingRange>, span: Span) {
    if span.end.line <= span.start.line {
        return;
    }

    ranges.push(FoldingRange {
        start_line: span.start.line as u32,
        start_character: None,
        end_line: span.end.line as u32,
        end_character: None,
        kind: Some(FoldingRangeKind::Region),
        collapsed_text: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<(u32, u32)> {
        get_folding_ranges(&Compilation::new(text))
            .into_iter()
            .map(|range| (range.start_line, range.end_line))
            .collect()
    }

    #[test]
    fn test_blocks_and_multiline_values() {
        let text = "action \"a\" {\n  uses = \"./a\"\n  needs = [\n    \"b\"\n  ]\n  env = { A = \"1\" }\n}\nworkflow \"w\" { on = \"push\" }";

        assert_eq!(lines(text), vec![(0, 6), (2, 4)]);
    }

    #[test]
    fn test_unclosed_block() {
        assert_eq!(lines("action \"a\" {\n  uses = \"./a\"\n"), vec![(0, 1)]);
    }
}
