//! Typed view of a document after binding.
//!
//! Bound nodes own their values and hold shared references to the syntax
//! they came from, used for diagnostic ranges and editor lookups.

use actionflow_syntax::{BlockSyntax, ObjectMemberSyntax, PropertySyntax, Span, Token, VersionSyntax};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct BoundDocument {
    pub version: Option<BoundVersion>,
    pub workflows: Vec<BoundWorkflow>,
    pub actions: Vec<BoundAction>,
}

#[derive(Debug, Clone)]
pub struct BoundVersion {
    pub value: u32,
    pub syntax: Arc<VersionSyntax>,
}

/// A string with its quotes removed, plus the token it came from.
#[derive(Debug, Clone)]
pub struct BoundStringValue {
    pub value: String,
    pub token: Token,
}

impl BoundStringValue {
    pub fn span(&self) -> Span {
        self.token.span
    }
}

/// One `NAME = "value"` entry of an `env` object.
#[derive(Debug, Clone)]
pub struct BoundObjectMember {
    pub name: String,
    pub value: BoundStringValue,
    pub syntax: ObjectMemberSyntax,
}

#[derive(Debug, Clone)]
pub struct BoundProperty<T> {
    pub value: T,
    pub syntax: Arc<PropertySyntax>,
}

pub type BoundOn = BoundProperty<Option<BoundStringValue>>;
pub type BoundResolves = BoundProperty<Vec<BoundStringValue>>;
pub type BoundUses = BoundProperty<Option<BoundStringValue>>;
pub type BoundNeeds = BoundProperty<Vec<BoundStringValue>>;
pub type BoundRuns = BoundProperty<Vec<BoundStringValue>>;
pub type BoundArgs = BoundProperty<Vec<BoundStringValue>>;
pub type BoundEnv = BoundProperty<Vec<BoundObjectMember>>;
pub type BoundSecrets = BoundProperty<Vec<BoundStringValue>>;

#[derive(Debug, Clone)]
pub struct BoundWorkflow {
    pub name: String,
    pub on: Option<BoundOn>,
    pub resolves: Option<BoundResolves>,
    pub syntax: Arc<BlockSyntax>,
}

#[derive(Debug, Clone)]
pub struct BoundAction {
    pub name: String,
    pub uses: Option<BoundUses>,
    pub needs: Option<BoundNeeds>,
    pub runs: Option<BoundRuns>,
    pub args: Option<BoundArgs>,
    pub env: Option<BoundEnv>,
    pub secrets: Option<BoundSecrets>,
    pub syntax: Arc<BlockSyntax>,
}

impl BoundAction {
    /// Entries of `needs`, empty when the property is absent.
    pub fn needs(&self) -> &[BoundStringValue] {
        self.needs.as_ref().map(|p| p.value.as_slice()).unwrap_or_default()
    }

    pub fn secrets(&self) -> &[BoundStringValue] {
        self.secrets.as_ref().map(|p| p.value.as_slice()).unwrap_or_default()
    }

    pub fn env(&self) -> &[BoundObjectMember] {
        self.env.as_ref().map(|p| p.value.as_slice()).unwrap_or_default()
    }
}

impl BoundWorkflow {
    pub fn resolves(&self) -> &[BoundStringValue] {
        self.resolves.as_ref().map(|p| p.value.as_slice()).unwrap_or_default()
    }
}

/// A workflow or an action, for passes that treat both alike.
#[derive(Debug, Clone, Copy)]
pub enum BoundBlock<'a> {
    Workflow(&'a BoundWorkflow),
    Action(&'a BoundAction),
}

impl<'a> BoundBlock<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            BoundBlock::Workflow(workflow) => &workflow.name,
            BoundBlock::Action(action) => &action.name,
        }
    }

    pub fn syntax(&self) -> &'a BlockSyntax {
        match *self {
            BoundBlock::Workflow(workflow) => &workflow.syntax,
            BoundBlock::Action(action) => &action.syntax,
        }
    }
}

impl BoundDocument {
    /// Workflows and actions interleaved in source order.
    pub fn blocks(&self) -> Vec<BoundBlock<'_>> {
        let mut blocks: Vec<BoundBlock<'_>> = self
            .workflows
            .iter()
            .map(BoundBlock::Workflow)
            .chain(self.actions.iter().map(BoundBlock::Action))
            .collect();
        blocks.sort_by_key(|block| block.syntax().keyword.span.start);
        blocks
    }
}
