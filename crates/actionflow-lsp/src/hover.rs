use crate::diagnostics::{from_lsp_position, span_to_range};
use crate::docs::get_keyword_doc;
use actionflow_semantic::Compilation;
use actionflow_syntax::Span;
use tower_lsp::lsp_types::*;
use tracing::debug;

/// Get hover information for the token at the given position
pub fn get_hover(compilation: &Compilation, position: Position) -> Option<Hover> {
    let position = from_lsp_position(position);

    if let Some(token) = compilation
        .tokens()
        .iter()
        .find(|token| token.kind.is_keyword() && token.span.contains(position))
    {
        debug!("Hover keyword: '{}'", token.text);
        let doc = get_keyword_doc(token.kind.description())?;
        let content = format!("**{}**\n\n{}\n\n```hcl\n{}\n```", doc.name, doc.description, doc.example);
        return Some(markdown(content, token.span));
    }

    let target = compilation.target_at(position)?;
    let action = compilation
        .document()
        .actions
        .iter()
        .find(|action| action.name == target.name)?;

    let mut content = format!("**action** `{}`", action.name);
    if let Some(uses) = action.uses.as_ref().and_then(|p| p.value.as_ref()) {
        content.push_str(&format!("\n\nuses `{}`", uses.value));
    }
    if !action.needs().is_empty() {
        let needs: Vec<String> = action.needs().iter().map(|n| format!("`{}`", n.value)).collect();
        content.push_str(&format!("\n\nneeds {}", needs.join(", ")));
    }

    Some(markdown(content, target.span))
}

fn markdown(value: String, span: Span) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(span_to_range(span)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "workflow \"ci\" {\n  on = \"push\"\n  resolves = \"test\"\n}\naction \"build\" {\n  uses = \"./b\"\n}\naction \"test\" {\n  uses = \"docker://node:10\"\n  needs = [\"build\"]\n}";

    fn hover_text(position: Position) -> Option<String> {
        match get_hover(&Compilation::new(TEXT), position)?.contents {
            HoverContents::Markup(markup) => Some(markup.value),
            _ => None,
        }
    }

    #[test]
    fn test_keyword_hover() {
        let text = hover_text(Position { line: 8, character: 3 }).unwrap();

        assert!(text.starts_with("**uses**"));
        assert!(text.contains("docker://"));
    }

    #[test]
    fn test_action_hover() {
        let text = hover_text(Position { line: 2, character: 15 }).unwrap();

        assert_eq!(text, "**action** `test`\n\nuses `docker://node:10`\n\nneeds `build`");
    }

    #[test]
    fn test_no_hover_on_plain_strings() {
        assert!(hover_text(Position { line: 1, character: 9 }).is_none());
    }
}
