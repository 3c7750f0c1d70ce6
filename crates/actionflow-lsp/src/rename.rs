use crate::diagnostics::{from_lsp_position, span_to_range};
use crate::references::reference_spans;
use actionflow_semantic::Compilation;
use actionflow_syntax::Span;
use std::collections::HashMap;
use tower_lsp::lsp_types::*;

/// The text between the quotes of the string token at `span`. Unterminated
/// strings have no closing quote to trim.
fn inner_range(compilation: &Compilation, span: Span) -> Range {
    let terminated = compilation
        .tokens()
        .iter()
        .find(|token| token.span == span)
        .is_some_and(|token| token.text.len() > 1 && token.text.ends_with('"'));

    let mut range = span_to_range(span);
    range.start.character += 1;
    if terminated {
        range.end.character -= 1;
    }
    range.end.character = range.end.character.max(range.start.character);
    range
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['"', '\\', '\r', '\n'])
}

/// Prepare rename operation (validate if renaming is allowed)
pub fn prepare_rename(compilation: &Compilation, position: Position) -> Option<Range> {
    let target = compilation.target_at(from_lsp_position(position))?;
    compilation.actions().get(&target.name)?;
    Some(inner_range(compilation, target.span))
}

/// Renames the action under the cursor: its block name and every
/// `needs`/`resolves` entry naming it.
pub fn execute_rename(compilation: &Compilation, position: Position, new_name: &str, uri: &Url) -> Option<WorkspaceEdit> {
    if !is_valid_name(new_name) {
        return None;
    }

    let target = compilation.target_at(from_lsp_position(position))?;
    let mut spans = reference_spans(compilation, position, false);
    if spans.is_empty() && compilation.actions().get(&target.name).is_none() {
        return None;
    }

    // Every block declaring the name, duplicates included.
    spans.extend(
        compilation
            .document()
            .actions
            .iter()
            .filter(|action| action.name == target.name)
            .map(|action| action.syntax.name.span),
    );

    let edits: Vec<TextEdit> = spans
        .into_iter()
        .map(|span| TextEdit {
            range: inner_range(compilation, span),
            new_text: new_name.to_string(),
        })
        .collect();

    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);

    Some(WorkspaceEdit {
        changes: Some(changes),
        document_changes: None,
        change_annotations: None,
    })
}
