//! # actionflow-semantic
//!
//! Everything after parsing: binding the syntax tree into typed blocks,
//! analyzing the result, and the formatter.
//!
//! ```text
//! DocumentSyntax
//!     ↓
//! Binder (bind)           → BoundDocument
//!     ↓
//! Analyzers (analyze)     → more diagnostics
//! ```
//!
//! [`Compilation`] runs the whole pipeline, from text to diagnostics, and is
//! what editors and the command line work with.
//!
//! ```rust
//! use actionflow_semantic::Compilation;
//!
//! let compilation = Compilation::new(r#"action "a" { uses = "ci" }"#);
//! let diagnostic = &compilation.diagnostics()[0];
//!
//! assert_eq!(diagnostic.span.start.line, 0);
//! assert!(diagnostic.message.contains("'uses'"));
//! ```

pub mod analysis;
pub mod binder;
pub mod bound;
pub mod cache;
pub mod compilation;
pub mod events;
pub mod format;

pub use binder::bind;
pub use bound::*;
pub use cache::{CompilationCache, DEFAULT_CACHE_SIZE};
pub use compilation::{ActionSymbol, ActionTarget, Compilation};
pub use format::format;
