//! Block bodies: properties and their string, array and object values.

use super::{ParseContext, Parser};
use crate::scanner::{Token, TokenKind};
use crate::syntax::{
    ArrayItemSyntax, ArrayPropertySyntax, ObjectMemberSyntax, ObjectPropertySyntax, PropertySyntax,
    StringPropertySyntax,
};
use std::sync::Arc;

impl Parser<'_> {
    pub(super) fn parse_properties(&mut self, context: &ParseContext<'_>) -> Vec<Arc<PropertySyntax>> {
        let mut properties = Vec::new();

        while !self.at_end() && !self.is_next(TokenKind::RightCurlyBracket) {
            let key = self.eat(context, &TokenKind::PROPERTY_KEYWORDS);
            if key.is_missing() {
                break;
            }

            let property = self.parse_property(key, &context.nested(&TokenKind::PROPERTY_KEYWORDS));
            properties.push(Arc::new(property));
        }

        properties
    }

    fn parse_property(&mut self, key: Token, context: &ParseContext<'_>) -> PropertySyntax {
        let equal = self.eat(context, &[TokenKind::Equal]);
        let value = self.eat(
            context,
            &[
                TokenKind::StringLiteral,
                TokenKind::LeftCurlyBracket,
                TokenKind::LeftSquareBracket,
            ],
        );

        match value.kind {
            TokenKind::LeftSquareBracket => {
                let items = self.parse_array_items(context);
                let close_bracket = self.eat(context, &[TokenKind::RightSquareBracket]);
                PropertySyntax::Array(ArrayPropertySyntax::new(key, equal, value, items, close_bracket))
            }
            TokenKind::LeftCurlyBracket => {
                let members = self.parse_object_members(context);
                let close_bracket = self.eat(context, &[TokenKind::RightCurlyBracket]);
                PropertySyntax::Object(ObjectPropertySyntax::new(key, equal, value, members, close_bracket))
            }
            // A string, or `Missing` when no value could be found.
            _ => PropertySyntax::String(StringPropertySyntax::new(key, equal, value)),
        }
    }

    fn parse_array_items(&mut self, context: &ParseContext<'_>) -> Vec<ArrayItemSyntax> {
        let mut items = Vec::new();

        while !self.at_end() && !self.is_next(TokenKind::RightSquareBracket) {
            let value = self.eat(context, &[TokenKind::StringLiteral]);
            if value.is_missing() {
                break;
            }

            let comma = self
                .is_next(TokenKind::Comma)
                .then(|| self.eat(context, &[TokenKind::Comma]));
            items.push(ArrayItemSyntax { value, comma });
        }

        items
    }

    fn parse_object_members(&mut self, context: &ParseContext<'_>) -> Vec<ObjectMemberSyntax> {
        let mut members = Vec::new();
        // A member whose value is missing gives way to the next member name.
        let member_context = context.nested(&[TokenKind::Identifier]);

        while !self.at_end() && !self.is_next(TokenKind::RightCurlyBracket) {
            let name = self.eat(context, &[TokenKind::Identifier]);
            if name.is_missing() {
                break;
            }

            let equal = self.eat(&member_context, &[TokenKind::Equal]);
            let value = self.eat(&member_context, &[TokenKind::StringLiteral]);
            let comma = self
                .is_next(TokenKind::Comma)
                .then(|| self.eat(&member_context, &[TokenKind::Comma]));

            members.push(ObjectMemberSyntax {
                name,
                equal,
                value,
                comma,
            });
        }

        members
    }
}
