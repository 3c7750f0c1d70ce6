use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct DocEntry {
    pub name: String,
    pub description: String,
    pub example: String,
}

#[derive(Debug, Deserialize)]
struct DocsDatabase {
    keywords: HashMap<String, DocEntry>,
}

static DOCS: Lazy<DocsDatabase> = Lazy::new(|| {
    let json = include_str!("keywords.json");
    serde_json::from_str(json).expect("Failed to parse keywords.json")
});

pub fn get_keyword_doc(keyword: &str) -> Option<&'static DocEntry> {
    DOCS.keywords.get(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionflow_syntax::TokenKind;

    #[test]
    fn test_every_keyword_is_documented() {
        let keywords = TokenKind::TOP_LEVEL_KEYWORDS
            .iter()
            .chain(TokenKind::PROPERTY_KEYWORDS.iter());

        for kind in keywords {
            let entry = get_keyword_doc(kind.description()).unwrap();
            assert_eq!(entry.name, kind.description());
            assert!(!entry.example.is_empty());
        }
    }

    #[test]
    fn test_docs_parse() {
        assert_eq!(DOCS.keywords.len(), 11);
        assert!(get_keyword_doc("unknown").is_none());
    }
}
