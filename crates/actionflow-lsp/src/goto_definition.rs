use crate::diagnostics::{from_lsp_position, span_to_range};
use actionflow_semantic::Compilation;
use tower_lsp::lsp_types::*;

/// Location of the action block named by the string under the cursor.
pub fn get_definition(compilation: &Compilation, position: Position, uri: &Url) -> Option<Location> {
    let target = compilation.target_at(from_lsp_position(position))?;
    let symbol = compilation.actions().get(&target.name)?;

    Some(Location {
        uri: uri.clone(),
        range: span_to_range(symbol.definition),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "action \"build\" {\n  uses = \"./b\"\n}\naction \"test\" {\n  uses = \"./t\"\n  needs = [\"build\", \"lint\"]\n}";

    fn uri() -> Url {
        Url::parse("file:///main.workflow").unwrap()
    }

    #[test]
    fn test_reference_jumps_to_block_name() {
        let compilation = Compilation::new(TEXT);
        let location = get_definition(&compilation, Position { line: 5, character: 13 }, &uri()).unwrap();

        assert_eq!(location.uri, uri());
        assert_eq!(
            location.range,
            Range {
                start: Position { line: 0, character: 7 },
                end: Position { line: 0, character: 14 },
            }
        );
    }

    #[test]
    fn test_unknown_action_has_no_definition() {
        let compilation = Compilation::new(TEXT);
        assert!(get_definition(&compilation, Position { line: 5, character: 22 }, &uri()).is_none());
    }

    #[test]
    fn test_definition_of_definition_is_itself() {
        let compilation = Compilation::new(TEXT);
        let location = get_definition(&compilation, Position { line: 3, character: 9 }, &uri()).unwrap();

        assert_eq!(location.range.start, Position { line: 3, character: 7 });
    }
}
