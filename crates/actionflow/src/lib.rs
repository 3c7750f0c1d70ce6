//! Compile workflow files and inspect the result.
//!
//! ```rust
//! use actionflow::prelude::*;
//!
//! let compilation = Compilation::new(
//!     r#"
//! workflow "ci" {
//!   on = "push"
//!   resolves = "test"
//! }
//!
//! action "test" {
//!   uses = "docker://node:10"
//! }
//! "#,
//! );
//!
//! assert!(compilation.diagnostics().is_empty());
//! assert_eq!(compilation.document().actions[0].name, "test");
//! ```

pub use actionflow_semantic::{
    ActionSymbol, ActionTarget, BoundAction, BoundDocument, BoundWorkflow, Compilation, CompilationCache, bind,
    format,
};
pub use actionflow_syntax::{
    Diagnostic, DiagnosticBag, DiagnosticCode, DocumentSyntax, Position, Severity, Span, Token, TokenKind, highlight,
    parse, scan,
};

pub mod prelude {
    pub use crate::{Compilation, CompilationCache, format, highlight};
    pub use crate::{Diagnostic, DiagnosticCode, Position, Severity, Span};
}
