use super::Analyzer;
use crate::bound::BoundDocument;
use actionflow_syntax::{DiagnosticBag, MAXIMUM_SUPPORTED_SECRETS};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct SecretsAnalyzer {
    reported_too_many_secrets: bool,
}

impl Analyzer for SecretsAnalyzer {
    fn analyze(&mut self, document: &BoundDocument, bag: &mut DiagnosticBag) {
        let mut all_secrets = HashSet::new();

        for action in &document.actions {
            let mut in_property = HashSet::new();

            for secret in action.secrets() {
                let name = secret.value.as_str();
                if !in_property.insert(name) {
                    bag.duplicate_secrets(name, secret.span());
                }

                if all_secrets.insert(name)
                    && all_secrets.len() > MAXIMUM_SUPPORTED_SECRETS
                    && !self.reported_too_many_secrets
                {
                    bag.too_many_secrets(secret.span());
                    self.reported_too_many_secrets = true;
                }
            }
        }
    }
}
