use super::Analyzer;
use crate::bound::{BoundDocument, BoundStringValue};
use actionflow_syntax::DiagnosticBag;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    OnStack,
    Done,
}

/// Finds a cycle in the `needs` graph. Only the first cycle is reported.
#[derive(Debug, Default)]
pub struct DependenciesAnalyzer {
    reported_cycle: bool,
}

impl Analyzer for DependenciesAnalyzer {
    fn analyze(&mut self, document: &BoundDocument, bag: &mut DiagnosticBag) {
        if self.reported_cycle {
            return;
        }

        let mut graph: HashMap<&str, &[BoundStringValue]> = HashMap::new();
        for action in &document.actions {
            graph.entry(action.name.as_str()).or_insert_with(|| action.needs());
        }

        let mut visits: HashMap<&str, Visit> = HashMap::with_capacity(graph.len());
        for action in &document.actions {
            if visits.contains_key(action.name.as_str()) {
                continue;
            }
            if let Some(edge) = find_cycle(&graph, &mut visits, &action.name) {
                bag.circular_dependency(&edge.value, edge.span());
                self.reported_cycle = true;
                return;
            }
        }
    }
}

/// Iterative depth-first walk from `root`. Returns the `needs` entry that
/// closes a cycle, if any.
fn find_cycle<'a>(
    graph: &HashMap<&'a str, &'a [BoundStringValue]>,
    visits: &mut HashMap<&'a str, Visit>,
    root: &'a str,
) -> Option<&'a BoundStringValue> {
    let mut stack: Vec<(&'a str, usize)> = vec![(root, 0)];
    visits.insert(root, Visit::OnStack);

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let needs = graph.get(node).copied().unwrap_or_default();
        let Some(dependency) = needs.get(frame.1) else {
            visits.insert(node, Visit::Done);
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let name = dependency.value.as_str();
        match visits.get(name) {
            Some(Visit::OnStack) => return Some(dependency),
            Some(Visit::Done) => {}
            None if graph.contains_key(name) => {
                visits.insert(name, Visit::OnStack);
                stack.push((name, 0));
            }
            // Unknown actions are reported elsewhere.
            None => {
                visits.insert(name, Visit::Done);
            }
        }
    }

    None
}
