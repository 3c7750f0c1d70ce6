use super::Analyzer;
use crate::bound::{BoundBlock, BoundDocument, BoundStringValue};
use actionflow_syntax::DiagnosticBag;
use std::collections::HashSet;

/// `resolves` and `needs` entries must name declared actions, once each.
#[derive(Debug, Default)]
pub struct ReferencesAnalyzer;

impl Analyzer for ReferencesAnalyzer {
    fn analyze(&mut self, document: &BoundDocument, bag: &mut DiagnosticBag) {
        let declared: HashSet<&str> = document.actions.iter().map(|a| a.name.as_str()).collect();

        for block in document.blocks() {
            let references = match block {
                BoundBlock::Workflow(workflow) => workflow.resolves(),
                BoundBlock::Action(action) => action.needs(),
            };
            check_references(&declared, references, bag);
        }
    }
}

fn check_references(declared: &HashSet<&str>, references: &[BoundStringValue], bag: &mut DiagnosticBag) {
    let mut seen = HashSet::with_capacity(references.len());

    for reference in references {
        let name = reference.value.as_str();
        if !declared.contains(name) {
            bag.action_does_not_exist(name, reference.span());
        }
        if !seen.insert(name) {
            bag.duplicate_actions(name, reference.span());
        }
    }
}
