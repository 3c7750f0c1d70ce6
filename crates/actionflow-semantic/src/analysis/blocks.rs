use super::Analyzer;
use crate::bound::{BoundBlock, BoundDocument};
use actionflow_syntax::{DiagnosticBag, MAXIMUM_SUPPORTED_ACTIONS};
use std::collections::HashSet;

/// Block names must be unique across workflows and actions, and the number
/// of actions is capped.
#[derive(Debug, Default)]
pub struct BlocksAnalyzer {
    reported_too_many_actions: bool,
}

impl Analyzer for BlocksAnalyzer {
    fn analyze(&mut self, document: &BoundDocument, bag: &mut DiagnosticBag) {
        let mut names = HashSet::new();
        let mut action_count = 0;

        for block in document.blocks() {
            let name = block.name();
            let span = block.syntax().name.span;

            if !names.insert(name) {
                bag.duplicate_block(name, span);
                continue;
            }

            if let BoundBlock::Action(_) = block {
                action_count += 1;
                if action_count > MAXIMUM_SUPPORTED_ACTIONS && !self.reported_too_many_actions {
                    bag.too_many_actions(span);
                    self.reported_too_many_actions = true;
                }
            }
        }
    }
}
