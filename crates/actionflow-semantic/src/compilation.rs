use crate::analysis;
use crate::binder::bind;
use crate::bound::{BoundBlock, BoundDocument, BoundStringValue};
use actionflow_syntax::{Diagnostic, DiagnosticBag, DocumentSyntax, Position, Span, Token, parse, scan};
use std::collections::BTreeMap;
use tracing::debug;

/// Where an action is declared and where it is referenced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSymbol {
    /// Span of the name string of the first block declaring the action.
    pub definition: Span,
    /// `needs` and `resolves` entries naming the action, in source order.
    pub references: Vec<Span>,
}

/// An action name string found under a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    pub name: String,
    pub span: Span,
}

/// Every stage of processing one document, computed eagerly.
#[derive(Debug)]
pub struct Compilation {
    text: String,
    tokens: Vec<Token>,
    syntax: DocumentSyntax,
    document: BoundDocument,
    diagnostics: Vec<Diagnostic>,
    actions: BTreeMap<String, ActionSymbol>,
}

impl Compilation {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut bag = DiagnosticBag::new();

        let tokens = scan(&text, &mut bag);
        let syntax = parse(&tokens, &mut bag);
        let document = bind(&syntax, &mut bag);
        analysis::analyze(&document, &mut bag);

        let actions = index_actions(&document);
        let diagnostics = bag.into_items();

        debug!(
            tokens = tokens.len(),
            blocks = syntax.blocks.len(),
            diagnostics = diagnostics.len(),
            "compiled document"
        );

        Self {
            text,
            tokens,
            syntax,
            document,
            diagnostics,
            actions,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// All scanned tokens, comments and unrecognized characters included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn syntax(&self) -> &DocumentSyntax {
        &self.syntax
    }

    pub fn document(&self) -> &BoundDocument {
        &self.document
    }

    /// Diagnostics in the order they were discovered.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics ordered by start position; ties keep discovery order.
    pub fn sorted_diagnostics(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by_key(|d| d.span.start);
        sorted
    }

    pub fn has_syntax_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.code.is_syntax_error())
    }

    /// Declared actions keyed by name.
    pub fn actions(&self) -> &BTreeMap<String, ActionSymbol> {
        &self.actions
    }

    /// The action name under `position`: either the name of an action block
    /// or an entry of a `needs`/`resolves` list.
    pub fn target_at(&self, position: Position) -> Option<ActionTarget> {
        for block in self.document.blocks() {
            let syntax = block.syntax();
            if !syntax.span().contains(position) {
                continue;
            }

            let references = match block {
                BoundBlock::Action(action) => {
                    if syntax.name.span.contains(position) && !syntax.name.is_missing() {
                        return Some(ActionTarget {
                            name: action.name.clone(),
                            span: syntax.name.span,
                        });
                    }
                    action.needs()
                }
                BoundBlock::Workflow(workflow) => workflow.resolves(),
            };

            return references
                .iter()
                .find(|reference| reference.span().contains(position))
                .map(|reference| ActionTarget {
                    name: reference.value.clone(),
                    span: reference.span(),
                });
        }

        None
    }
}

fn index_actions(document: &BoundDocument) -> BTreeMap<String, ActionSymbol> {
    let mut actions = BTreeMap::new();
    for action in &document.actions {
        actions.entry(action.name.clone()).or_insert_with(|| ActionSymbol {
            definition: action.syntax.name.span,
            references: Vec::new(),
        });
    }

    let mut references: Vec<&BoundStringValue> = Vec::new();
    for block in document.blocks() {
        match block {
            BoundBlock::Workflow(workflow) => references.extend(workflow.resolves()),
            BoundBlock::Action(action) => references.extend(action.needs()),
        }
    }

    for reference in references {
        if let Some(symbol) = actions.get_mut(&reference.value) {
            symbol.references.push(reference.span());
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPELINE: &str = r#"workflow "ci" {
  on = "push"
  resolves = ["deploy"]
}

action "build" {
  uses = "./build"
}

action "deploy" {
  uses = "./deploy"
  needs = ["build"]
}
"#;

    #[test]
    fn test_compilation_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compilation>();
    }

    #[test]
    fn test_actions_index() {
        let compilation = Compilation::new(PIPELINE);
        assert!(compilation.diagnostics().is_empty(), "{:?}", compilation.diagnostics());

        let actions = compilation.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions["build"].definition, Span::single(5, 7, 7));
        assert_eq!(actions["build"].references, vec![Span::single(11, 11, 7)]);
        assert_eq!(actions["deploy"].references, vec![Span::single(2, 14, 8)]);
    }

    #[test]
    fn test_target_at_definition_and_reference() {
        let compilation = Compilation::new(PIPELINE);

        let definition = compilation.target_at(Position::new(5, 9));
        assert_eq!(definition.map(|t| t.name), Some("build".to_string()));

        let reference = compilation.target_at(Position::new(2, 16));
        assert_eq!(
            reference,
            Some(ActionTarget {
                name: "deploy".to_string(),
                span: Span::single(2, 14, 8),
            })
        );

        assert_eq!(compilation.target_at(Position::new(1, 3)), None);
        assert_eq!(compilation.target_at(Position::new(0, 10)), None);
    }

    #[test]
    fn test_sorted_diagnostics() {
        let compilation = Compilation::new("action \"b\" {\n  uses = \"x\"\n}\naction \"a\" {}\n");
        let lines: Vec<usize> = compilation
            .sorted_diagnostics()
            .iter()
            .map(|d| d.span.start.line)
            .collect();

        assert_eq!(compilation.diagnostics().len(), 2);
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_has_syntax_errors() {
        assert!(Compilation::new("action").has_syntax_errors());
        assert!(!Compilation::new("action \"a\" {}").has_syntax_errors());
    }
}
