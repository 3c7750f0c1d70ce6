//! Concrete syntax tree produced by the parser.
//!
//! Nodes keep every non-trivia token they were built from, including the
//! `Missing` placeholders inserted during recovery. Spans are computed on
//! first use and cached.

use crate::diagnostics::Span;
use crate::scanner::{Token, TokenKind};
use once_cell::sync::OnceCell;
use std::sync::Arc;

fn merge_tokens<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> Span {
    let mut tokens = tokens.into_iter();
    let Some(first) = tokens.next() else {
        return Span::default();
    };
    tokens.fold(first.span, |span, token| span.merge(&token.span))
}

#[derive(Debug, Clone, Default)]
pub struct DocumentSyntax {
    pub versions: Vec<Arc<VersionSyntax>>,
    pub blocks: Vec<Arc<BlockSyntax>>,
}

impl DocumentSyntax {
    /// Versions and blocks interleaved in source order.
    pub fn items(&self) -> Vec<TopLevelSyntax<'_>> {
        let mut items: Vec<TopLevelSyntax<'_>> = self
            .versions
            .iter()
            .map(|v| TopLevelSyntax::Version(v.as_ref()))
            .chain(self.blocks.iter().map(|b| TopLevelSyntax::Block(b.as_ref())))
            .collect();
        items.sort_by_key(|item| item.span().start);
        items
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TopLevelSyntax<'a> {
    Version(&'a VersionSyntax),
    Block(&'a BlockSyntax),
}

impl TopLevelSyntax<'_> {
    pub fn span(&self) -> Span {
        match self {
            TopLevelSyntax::Version(version) => version.span(),
            TopLevelSyntax::Block(block) => block.span(),
        }
    }
}

/// `version = <integer>`
#[derive(Debug, Clone)]
pub struct VersionSyntax {
    pub version: Token,
    pub equal: Token,
    pub integer: Token,
    span: OnceCell<Span>,
}

impl VersionSyntax {
    pub fn new(version: Token, equal: Token, integer: Token) -> Self {
        Self {
            version,
            equal,
            integer,
            span: OnceCell::new(),
        }
    }

    pub fn span(&self) -> Span {
        *self
            .span
            .get_or_init(|| merge_tokens([&self.version, &self.equal, &self.integer]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Workflow,
    Action,
}

impl BlockKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Workflow => "workflow",
            BlockKind::Action => "action",
        }
    }

    /// Property keywords a block of this kind accepts.
    pub fn properties(self) -> &'static [TokenKind] {
        match self {
            BlockKind::Workflow => &[TokenKind::OnKeyword, TokenKind::ResolvesKeyword],
            BlockKind::Action => &[
                TokenKind::UsesKeyword,
                TokenKind::NeedsKeyword,
                TokenKind::RunsKeyword,
                TokenKind::ArgsKeyword,
                TokenKind::EnvKeyword,
                TokenKind::SecretsKeyword,
            ],
        }
    }
}

/// `workflow "name" { ... }` or `action "name" { ... }`
#[derive(Debug, Clone)]
pub struct BlockSyntax {
    pub block_kind: BlockKind,
    pub keyword: Token,
    pub name: Token,
    pub open_bracket: Token,
    pub properties: Vec<Arc<PropertySyntax>>,
    pub close_bracket: Token,
    span: OnceCell<Span>,
}

impl BlockSyntax {
    pub fn new(
        block_kind: BlockKind,
        keyword: Token,
        name: Token,
        open_bracket: Token,
        properties: Vec<Arc<PropertySyntax>>,
        close_bracket: Token,
    ) -> Self {
        Self {
            block_kind,
            keyword,
            name,
            open_bracket,
            properties,
            close_bracket,
            span: OnceCell::new(),
        }
    }

    pub fn span(&self) -> Span {
        *self.span.get_or_init(|| {
            let tokens = merge_tokens([&self.keyword, &self.name, &self.open_bracket, &self.close_bracket]);
            self.properties
                .iter()
                .fold(tokens, |span, property| span.merge(&property.span()))
        })
    }
}

#[derive(Debug, Clone)]
pub enum PropertySyntax {
    String(StringPropertySyntax),
    Array(ArrayPropertySyntax),
    Object(ObjectPropertySyntax),
}

impl PropertySyntax {
    pub fn key(&self) -> &Token {
        match self {
            PropertySyntax::String(p) => &p.key,
            PropertySyntax::Array(p) => &p.key,
            PropertySyntax::Object(p) => &p.key,
        }
    }

    pub fn equal(&self) -> &Token {
        match self {
            PropertySyntax::String(p) => &p.equal,
            PropertySyntax::Array(p) => &p.equal,
            PropertySyntax::Object(p) => &p.equal,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            PropertySyntax::String(p) => p.span(),
            PropertySyntax::Array(p) => p.span(),
            PropertySyntax::Object(p) => p.span(),
        }
    }
}

/// `key = "value"`. `value` is `Missing` when recovery found nothing.
#[derive(Debug, Clone)]
pub struct StringPropertySyntax {
    pub key: Token,
    pub equal: Token,
    pub value: Token,
    span: OnceCell<Span>,
}

impl StringPropertySyntax {
    pub fn new(key: Token, equal: Token, value: Token) -> Self {
        Self {
            key,
            equal,
            value,
            span: OnceCell::new(),
        }
    }

    pub fn span(&self) -> Span {
        *self
            .span
            .get_or_init(|| merge_tokens([&self.key, &self.equal, &self.value]))
    }
}

#[derive(Debug, Clone)]
pub struct ArrayItemSyntax {
    pub value: Token,
    pub comma: Option<Token>,
}

impl ArrayItemSyntax {
    pub fn span(&self) -> Span {
        merge_tokens(std::iter::once(&self.value).chain(self.comma.as_ref()))
    }
}

/// `key = [ "a", "b" ]`
#[derive(Debug, Clone)]
pub struct ArrayPropertySyntax {
    pub key: Token,
    pub equal: Token,
    pub open_bracket: Token,
    pub items: Vec<ArrayItemSyntax>,
    pub close_bracket: Token,
    span: OnceCell<Span>,
}

impl ArrayPropertySyntax {
    pub fn new(
        key: Token,
        equal: Token,
        open_bracket: Token,
        items: Vec<ArrayItemSyntax>,
        close_bracket: Token,
    ) -> Self {
        Self {
            key,
            equal,
            open_bracket,
            items,
            close_bracket,
            span: OnceCell::new(),
        }
    }

    pub fn span(&self) -> Span {
        *self.span.get_or_init(|| {
            let tokens = merge_tokens([&self.key, &self.equal, &self.open_bracket, &self.close_bracket]);
            self.items
                .iter()
                .fold(tokens, |span, item| span.merge(&item.span()))
        })
    }
}

/// `NAME = "value"` inside an object, optionally followed by a comma.
#[derive(Debug, Clone)]
pub struct ObjectMemberSyntax {
    pub name: Token,
    pub equal: Token,
    pub value: Token,
    pub comma: Option<Token>,
}

impl ObjectMemberSyntax {
    pub fn span(&self) -> Span {
        merge_tokens([&self.name, &self.equal, &self.value].into_iter().chain(self.comma.as_ref()))
    }
}

/// `key = { NAME = "value" }`
#[derive(Debug, Clone)]
pub struct ObjectPropertySyntax {
    pub key: Token,
    pub equal: Token,
    pub open_bracket: Token,
    pub members: Vec<ObjectMemberSyntax>,
    pub close_bracket: Token,
    span: OnceCell<Span>,
}

impl ObjectPropertySyntax {
    pub fn new(
        key: Token,
        equal: Token,
        open_bracket: Token,
        members: Vec<ObjectMemberSyntax>,
        close_bracket: Token,
    ) -> Self {
        Self {
            key,
            equal,
            open_bracket,
            members,
            close_bracket,
            span: OnceCell::new(),
        }
    }

    pub fn span(&self) -> Span {
        *self.span.get_or_init(|| {
            let tokens = merge_tokens([&self.key, &self.equal, &self.open_bracket, &self.close_bracket]);
            self.members
                .iter()
                .fold(tokens, |span, member| span.merge(&member.span()))
        })
    }
}
