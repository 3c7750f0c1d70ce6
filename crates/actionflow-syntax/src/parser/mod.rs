mod blocks;
mod properties;

use crate::diagnostics::DiagnosticBag;
use crate::scanner::{Token, TokenKind};
use crate::syntax::{BlockSyntax, DocumentSyntax, VersionSyntax};
use std::sync::Arc;

/// Token kinds that enclosing constructs are able to resume on.
///
/// When the parser meets a token it did not expect, it walks this chain
/// before skipping anything: if an ancestor can handle the token, the
/// current construct gives up with a `Missing` token instead.
#[derive(Clone, Copy)]
pub(super) struct ParseContext<'c> {
    parent: Option<&'c ParseContext<'c>>,
    supported: &'c [TokenKind],
}

impl<'c> ParseContext<'c> {
    pub(super) const ROOT: ParseContext<'static> = ParseContext {
        parent: None,
        supported: &[],
    };

    pub(super) fn nested(&'c self, supported: &'c [TokenKind]) -> ParseContext<'c> {
        ParseContext {
            parent: Some(self),
            supported,
        }
    }

    fn supports(&self, kind: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(context) = current {
            if context.supported.contains(&kind) {
                return true;
            }
            current = context.parent;
        }
        false
    }
}

/// Recursive-descent parser over the non-trivia tokens of one document.
///
/// Use the free function [`parse()`] as the entry point.
pub(crate) struct Parser<'b> {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    reported: Vec<bool>,
    pub(super) bag: &'b mut DiagnosticBag,
    pub(super) versions: Vec<Arc<VersionSyntax>>,
    pub(super) blocks: Vec<Arc<BlockSyntax>>,
}

impl<'b> Parser<'b> {
    fn new(tokens: Vec<Token>, bag: &'b mut DiagnosticBag) -> Self {
        let reported = vec![false; tokens.len()];
        Self {
            tokens,
            pos: 0,
            reported,
            bag,
            versions: Vec::new(),
            blocks: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub(super) fn is_next(&self, kind: TokenKind) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.kind == kind)
    }

    /// Returns true the first time a diagnostic is attached to `index`.
    fn mark_reported(&mut self, index: usize) -> bool {
        match self.reported.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Consumes the next token if it is one of `expected`.
    ///
    /// Otherwise tokens are skipped (and reported once each) until one
    /// matches, or one can be handled by an enclosing construct, or input
    /// runs out. In the last two cases a `Missing` token is returned and
    /// nothing further is consumed.
    pub(super) fn eat(&mut self, context: &ParseContext<'_>, expected: &[TokenKind]) -> Token {
        loop {
            let Some(current) = self.tokens.get(self.pos) else {
                return self.missing_token(expected);
            };

            if expected.contains(&current.kind) {
                let token = current.clone();
                self.pos += 1;
                return token;
            }

            let (kind, span) = (current.kind, current.span);
            if context.supports(kind) {
                return self.missing_token(expected);
            }

            if self.mark_reported(self.pos) {
                self.bag.unexpected_token(kind.description(), span);
            }
            self.pos += 1;
        }
    }

    fn missing_token(&mut self, expected: &[TokenKind]) -> Token {
        let at_end_of_file = self.at_end();
        let index = if at_end_of_file {
            self.tokens.len().saturating_sub(1)
        } else {
            self.pos
        };

        let span = self.tokens.get(index).map(|t| t.span).unwrap_or_default();
        if self.mark_reported(index) {
            let mut descriptions: Vec<&str> = Vec::with_capacity(expected.len());
            for kind in expected {
                if !descriptions.contains(&kind.description()) {
                    descriptions.push(kind.description());
                }
            }
            self.bag.missing_token(&descriptions, span, at_end_of_file);
        }

        Token::missing(span)
    }

    fn finish(self) -> DocumentSyntax {
        DocumentSyntax {
            versions: self.versions,
            blocks: self.blocks,
        }
    }
}

/// Parses scanned tokens into a [`DocumentSyntax`].
///
/// Comments and unrecognized tokens are dropped first. Parsing always
/// produces a tree; every problem found along the way lands in `bag`.
pub fn parse(tokens: &[Token], bag: &mut DiagnosticBag) -> DocumentSyntax {
    let tokens: Vec<Token> = tokens.iter().filter(|t| !t.kind.is_trivia()).cloned().collect();
    let mut parser = Parser::new(tokens, bag);

    while !parser.at_end() {
        parser.parse_top_level(&ParseContext::ROOT);
    }

    parser.finish()
}
