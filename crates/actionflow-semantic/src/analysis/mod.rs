//! Passes over the bound tree that report cross-block problems.
//!
//! Each analyzer looks at the whole [`BoundDocument`] once. They are
//! independent of each other and always run in the same order so that the
//! diagnostic stream is deterministic.

mod blocks;
mod dependencies;
mod references;
mod secrets;
mod values;

pub use blocks::BlocksAnalyzer;
pub use dependencies::DependenciesAnalyzer;
pub use references::ReferencesAnalyzer;
pub use secrets::SecretsAnalyzer;
pub use values::ValuesAnalyzer;

use crate::bound::BoundDocument;
use actionflow_syntax::DiagnosticBag;

pub trait Analyzer {
    fn analyze(&mut self, document: &BoundDocument, bag: &mut DiagnosticBag);
}

/// Runs every analyzer over `document`.
pub fn analyze(document: &BoundDocument, bag: &mut DiagnosticBag) {
    let mut analyzers: [Box<dyn Analyzer>; 5] = [
        Box::new(BlocksAnalyzer::default()),
        Box::new(DependenciesAnalyzer::default()),
        Box::new(ReferencesAnalyzer),
        Box::new(SecretsAnalyzer::default()),
        Box::new(ValuesAnalyzer),
    ];

    for analyzer in analyzers.iter_mut() {
        analyzer.analyze(document, bag);
    }
}
