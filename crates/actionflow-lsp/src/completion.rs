use crate::diagnostics::from_lsp_position;
use actionflow_semantic::Compilation;
use actionflow_semantic::events::WEBHOOK_EVENTS;
use actionflow_syntax::{BlockSyntax, PropertySyntax, Token, TokenKind};
use tower_lsp::lsp_types::*;

/// Get completion items at the given position
pub fn get_completions(compilation: &Compilation, position: Position) -> Vec<CompletionItem> {
    let position = from_lsp_position(position);

    let Some(block) = compilation
        .syntax()
        .blocks
        .iter()
        .find(|block| block.span().contains(position))
    else {
        return Vec::new();
    };

    if !block.open_bracket.is_missing() && position < block.open_bracket.span.end {
        return Vec::new();
    }

    match block.properties.iter().find(|p| p.span().contains(position)) {
        Some(property) => {
            if !string_values(property).iter().any(|token| token.span.contains(position)) {
                return Vec::new();
            }

            match property.key().kind {
                TokenKind::NeedsKeyword | TokenKind::ResolvesKeyword => action_completions(compilation),
                TokenKind::OnKeyword => event_completions(),
                _ => Vec::new(),
            }
        }
        None => property_completions(block),
    }
}

/// String tokens a cursor can sit in: the value, or the array items.
fn string_values(property: &PropertySyntax) -> Vec<&Token> {
    let values: Vec<&Token> = match property {
        PropertySyntax::String(string) => vec![&string.value],
        PropertySyntax::Array(array) => array.items.iter().map(|item| &item.value).collect(),
        PropertySyntax::Object(_) => Vec::new(),
    };

    values
        .into_iter()
        .filter(|token| token.kind == TokenKind::StringLiteral)
        .collect()
}

fn action_completions(compilation: &Compilation) -> Vec<CompletionItem> {
    compilation
        .actions()
        .keys()
        .map(|action| CompletionItem {
            label: action.clone(),
            kind: Some(CompletionItemKind::CLASS),
            detail: Some(format!("Insert the action '{}'.", action)),
            ..Default::default()
        })
        .collect()
}

fn event_completions() -> Vec<CompletionItem> {
    WEBHOOK_EVENTS
        .iter()
        .map(|event| CompletionItem {
            label: event.to_string(),
            kind: Some(CompletionItemKind::EVENT),
            detail: Some(format!("Insert the event '{}'.", event)),
            ..Default::default()
        })
        .collect()
}

fn property_completions(block: &BlockSyntax) -> Vec<CompletionItem> {
    block
        .block_kind
        .properties()
        .iter()
        .map(|kind| {
            let property = kind.description();
            CompletionItem {
                label: property.to_string(),
                kind: Some(CompletionItemKind::PROPERTY),
                detail: Some(format!("Insert a new '{}' property.", property)),
                insert_text: Some(format!("{} = ", property)),
                insert_text_format: Some(InsertTextFormat::PLAIN_TEXT),
                ..Default::default()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str, line: u32, character: u32) -> Vec<String> {
        let compilation = Compilation::new(text);
        get_completions(&compilation, Position { line, character })
            .into_iter()
            .map(|item| item.label)
            .collect()
    }

    #[test]
    fn test_property_keywords_inside_block() {
        let text = "workflow \"w\" {\n  \n}\naction \"a\" {\n  \n}";

        assert_eq!(labels(text, 1, 2), vec!["on", "resolves"]);
        assert_eq!(labels(text, 4, 2), vec!["uses", "needs", "runs", "args", "env", "secrets"]);
    }

    #[test]
    fn test_nothing_outside_blocks() {
        let text = "action \"a\" {\n}\n\n";

        assert!(labels(text, 2, 0).is_empty());
        assert!(labels(text, 0, 3).is_empty());
    }

    #[test]
    fn test_actions_inside_needs_string() {
        let text = "action \"build\" { uses = \"./b\" }\naction \"test\" {\n  uses = \"./t\"\n  needs = [\"\"]\n}";

        assert_eq!(labels(text, 3, 12), vec!["build", "test"]);
        assert!(labels(text, 2, 4).is_empty());
    }

    #[test]
    fn test_events_inside_on_string() {
        let text = "workflow \"w\" {\n  on = \"\"\n}";
        let items = labels(text, 1, 8);

        assert_eq!(items.len(), WEBHOOK_EVENTS.len());
        assert_eq!(items[0], "check_run");
    }

    #[test]
    fn test_completion_item_details() {
        let compilation = Compilation::new("action \"a\" {\n  \n}");
        let items = get_completions(&compilation, Position { line: 1, character: 2 });

        assert_eq!(items[0].kind, Some(CompletionItemKind::PROPERTY));
        assert_eq!(items[0].detail.as_deref(), Some("Insert a new 'uses' property."));
    }
}
