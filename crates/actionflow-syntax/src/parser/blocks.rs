//! Top-level parsing: version statements and workflow/action blocks.

use super::{ParseContext, Parser};
use crate::scanner::{Token, TokenKind};
use crate::syntax::{BlockKind, BlockSyntax, VersionSyntax};
use std::sync::Arc;

impl Parser<'_> {
    pub(super) fn parse_top_level(&mut self, context: &ParseContext<'_>) {
        let keyword = self.eat(context, &TokenKind::TOP_LEVEL_KEYWORDS);
        let inner = context.nested(&TokenKind::TOP_LEVEL_KEYWORDS);

        match keyword.kind {
            TokenKind::VersionKeyword => self.parse_version(keyword, &inner),
            TokenKind::WorkflowKeyword => self.parse_block(BlockKind::Workflow, keyword, &inner),
            TokenKind::ActionKeyword => self.parse_block(BlockKind::Action, keyword, &inner),
            // Only reached at the end of input.
            _ => {}
        }
    }

    fn parse_version(&mut self, version: Token, context: &ParseContext<'_>) {
        let equal = self.eat(context, &[TokenKind::Equal]);
        let integer = self.eat(context, &[TokenKind::IntegerLiteral]);

        self.versions.push(Arc::new(VersionSyntax::new(version, equal, integer)));
    }

    fn parse_block(&mut self, block_kind: BlockKind, keyword: Token, context: &ParseContext<'_>) {
        let name = self.eat(context, &[TokenKind::StringLiteral]);
        let open_bracket = self.eat(context, &[TokenKind::LeftCurlyBracket]);

        let properties = self.parse_properties(&context.nested(&[TokenKind::RightCurlyBracket]));

        let close_bracket = self.eat(context, &[TokenKind::RightCurlyBracket]);
        self.blocks.push(Arc::new(BlockSyntax::new(
            block_kind,
            keyword,
            name,
            open_bracket,
            properties,
            close_bracket,
        )));
    }
}
