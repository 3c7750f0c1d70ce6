use crate::bound::*;
use actionflow_syntax::{
    BlockKind, BlockSyntax, DiagnosticBag, DocumentSyntax, MAXIMUM_SUPPORTED_VERSION, PropertySyntax, Token,
    TokenKind, VersionSyntax,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Converts a syntax tree into a [`BoundDocument`].
///
/// Shape mismatches, repeated or misplaced properties and version problems
/// are reported to `bag`; the offending pieces are left out of the result.
pub fn bind(syntax: &DocumentSyntax, bag: &mut DiagnosticBag) -> BoundDocument {
    Binder::new(bag).run(syntax)
}

/// Strips one leading quote and, if present, one trailing quote.
///
/// Tokens cut short by recovery have no closing quote; empty text stays empty.
pub fn remove_double_quotes(text: &str) -> String {
    match text.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').unwrap_or(inner).to_string(),
        None => text.to_string(),
    }
}

struct Binder<'b> {
    bag: &'b mut DiagnosticBag,
    document: BoundDocument,
}

impl<'b> Binder<'b> {
    fn new(bag: &'b mut DiagnosticBag) -> Self {
        Self {
            bag,
            document: BoundDocument::default(),
        }
    }

    fn run(mut self, syntax: &DocumentSyntax) -> BoundDocument {
        for version in &syntax.versions {
            self.bind_version(version);
        }

        let mut reported_misplaced_version = false;
        for block in &syntax.blocks {
            if !reported_misplaced_version
                && let Some(version) = &self.document.version
                && block.keyword.span.start.line < version.syntax.version.span.start.line
            {
                self.bag.version_after_block(version.syntax.version.span);
                reported_misplaced_version = true;
            }

            match block.block_kind {
                BlockKind::Workflow => self.bind_workflow(block),
                BlockKind::Action => self.bind_action(block),
            }
        }

        self.document
    }

    fn bind_version(&mut self, syntax: &Arc<VersionSyntax>) {
        if self.document.version.is_some() {
            self.bag.multiple_versions(syntax.version.span);
            return;
        }

        let integer = &syntax.integer;
        let value = if integer.is_missing() {
            0
        } else {
            match integer.text.parse::<u32>() {
                Ok(value) if value <= MAXIMUM_SUPPORTED_VERSION => value,
                _ => {
                    self.bag.unrecognized_version(&integer.text, integer.span);
                    0
                }
            }
        };

        self.document.version = Some(BoundVersion {
            value,
            syntax: Arc::clone(syntax),
        });
    }

    /// Reports a repeated key and tells the caller whether to bind it.
    fn first_definition(&mut self, seen: &mut HashSet<TokenKind>, key: &Token) -> bool {
        if seen.insert(key.kind) {
            true
        } else {
            self.bag.property_already_defined(&key.text, key.span);
            false
        }
    }

    fn bind_workflow(&mut self, syntax: &Arc<BlockSyntax>) {
        let mut seen = HashSet::new();
        let mut on = None;
        let mut resolves = None;

        for property in &syntax.properties {
            let key = property.key();
            match key.kind {
                TokenKind::OnKeyword | TokenKind::ResolvesKeyword => {
                    if !self.first_definition(&mut seen, key) {
                        continue;
                    }
                    if key.kind == TokenKind::OnKeyword {
                        on = Some(BoundProperty {
                            value: self.bind_string(property),
                            syntax: Arc::clone(property),
                        });
                    } else {
                        resolves = Some(BoundProperty {
                            value: self.bind_string_or_array(property),
                            syntax: Arc::clone(property),
                        });
                    }
                }
                _ => self.bag.invalid_property(&key.text, BlockKind::Workflow.keyword(), key.span),
            }
        }

        if on.is_none() {
            self.bag.property_must_be_defined(
                TokenKind::OnKeyword.description(),
                BlockKind::Workflow.keyword(),
                syntax.keyword.span,
            );
        }

        self.document.workflows.push(BoundWorkflow {
            name: remove_double_quotes(&syntax.name.text),
            on,
            resolves,
            syntax: Arc::clone(syntax),
        });
    }

    fn bind_action(&mut self, syntax: &Arc<BlockSyntax>) {
        let mut seen = HashSet::new();
        let mut action = BoundAction {
            name: remove_double_quotes(&syntax.name.text),
            uses: None,
            needs: None,
            runs: None,
            args: None,
            env: None,
            secrets: None,
            syntax: Arc::clone(syntax),
        };

        for property in &syntax.properties {
            let key = property.key();
            if !BlockKind::Action.properties().contains(&key.kind) {
                self.bag.invalid_property(&key.text, BlockKind::Action.keyword(), key.span);
                continue;
            }
            if !self.first_definition(&mut seen, key) {
                continue;
            }

            let property_syntax = Arc::clone(property);
            match key.kind {
                TokenKind::UsesKeyword => {
                    action.uses = Some(BoundProperty {
                        value: self.bind_string(property),
                        syntax: property_syntax,
                    })
                }
                TokenKind::NeedsKeyword => {
                    action.needs = Some(BoundProperty {
                        value: self.bind_string_or_array(property),
                        syntax: property_syntax,
                    })
                }
                TokenKind::RunsKeyword => {
                    action.runs = Some(BoundProperty {
                        value: self.bind_string_or_array(property),
                        syntax: property_syntax,
                    })
                }
                TokenKind::ArgsKeyword => {
                    action.args = Some(BoundProperty {
                        value: self.bind_string_or_array(property),
                        syntax: property_syntax,
                    })
                }
                TokenKind::EnvKeyword => {
                    action.env = Some(BoundProperty {
                        value: self.bind_object(property),
                        syntax: property_syntax,
                    })
                }
                TokenKind::SecretsKeyword => {
                    action.secrets = Some(BoundProperty {
                        value: self.bind_string_or_array(property),
                        syntax: property_syntax,
                    })
                }
                other => unreachable!("{} is not an action property", other),
            }
        }

        if action.uses.is_none() {
            self.bag.property_must_be_defined(
                TokenKind::UsesKeyword.description(),
                BlockKind::Action.keyword(),
                syntax.keyword.span,
            );
        }

        self.document.actions.push(action);
    }

    fn bind_string(&mut self, property: &PropertySyntax) -> Option<BoundStringValue> {
        match property {
            PropertySyntax::String(string) => string_value(&string.value),
            PropertySyntax::Array(_) | PropertySyntax::Object(_) => {
                self.bag.value_is_not_string(property.key().span);
                None
            }
        }
    }

    fn bind_string_or_array(&mut self, property: &PropertySyntax) -> Vec<BoundStringValue> {
        match property {
            PropertySyntax::String(string) => string_value(&string.value).into_iter().collect(),
            PropertySyntax::Array(array) => array.items.iter().filter_map(|item| string_value(&item.value)).collect(),
            PropertySyntax::Object(_) => {
                self.bag.value_is_not_string_or_array(property.key().span);
                Vec::new()
            }
        }
    }

    fn bind_object(&mut self, property: &PropertySyntax) -> Vec<BoundObjectMember> {
        let PropertySyntax::Object(object) = property else {
            self.bag.value_is_not_an_object(property.key().span);
            return Vec::new();
        };

        let mut names = HashSet::new();
        let mut members = Vec::with_capacity(object.members.len());
        for member in &object.members {
            let Some(value) = string_value(&member.value) else {
                continue;
            };
            if member.name.is_missing() {
                continue;
            }
            if !names.insert(member.name.text.as_str()) {
                self.bag.duplicate_key(&member.name.text, member.name.span);
                continue;
            }

            members.push(BoundObjectMember {
                name: member.name.text.clone(),
                value,
                syntax: member.clone(),
            });
        }

        members
    }
}

fn string_value(token: &Token) -> Option<BoundStringValue> {
    (!token.is_missing()).then(|| BoundStringValue {
        value: remove_double_quotes(&token.text),
        token: token.clone(),
    })
}
