use crate::diagnostics::span_to_range;
use actionflow_semantic::Compilation;
use actionflow_syntax::{BlockKind, BlockSyntax, PropertySyntax};
use tower_lsp::lsp_types::*;

/// Get document symbols for outline view
pub fn get_document_symbols(compilation: &Compilation) -> Vec<DocumentSymbol> {
    compilation
        .syntax()
        .blocks
        .iter()
        .filter(|block| !block.name.is_missing())
        .map(|block| block_symbol(block))
        .collect()
}

fn block_symbol(block: &BlockSyntax) -> DocumentSymbol {
    let kind = match block.block_kind {
        BlockKind::Workflow => SymbolKind::MODULE,
        BlockKind::Action => SymbolKind::CLASS,
    };
    let children = block.properties.iter().map(|p| property_symbol(p)).collect();

    #[allow(deprecated)]
    DocumentSymbol {
        name: actionflow_semantic::binder::remove_double_quotes(&block.name.text),
        detail: Some(block.block_kind.keyword().to_string()),
        kind,
        tags: None,
        deprecated: None,
        range: span_to_range(block.span()),
        selection_range: span_to_range(block.name.span),
        children: Some(children),
    }
}

fn property_symbol(property: &PropertySyntax) -> DocumentSymbol {
    let key = property.key();
    let detail = match property {
        PropertySyntax::String(string) if !string.value.is_missing() => Some(string.value.text.clone()),
        PropertySyntax::Array(array) => Some(format!("{} items", array.items.len())),
        PropertySyntax::Object(object) => Some(format!("{} variables", object.members.len())),
        _ => None,
    };

    #[allow(deprecated)]
    DocumentSymbol {
        name: key.text.clone(),
        detail,
        kind: SymbolKind::PROPERTY,
        tags: None,
        deprecated: None,
        range: span_to_range(property.span()),
        selection_range: span_to_range(key.span),
        children: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline() {
        let text = "workflow \"ci\" {\n  on = \"push\"\n}\naction \"build\" {\n  uses = \"./b\"\n  secrets = [\"A\", \"B\"]\n}";
        let symbols = get_document_symbols(&Compilation::new(text));

        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "ci");
        assert_eq!(symbols[0].kind, SymbolKind::MODULE);
        assert_eq!(symbols[1].name, "build");
        assert_eq!(symbols[1].kind, SymbolKind::CLASS);
        assert_eq!(symbols[1].selection_range.start, Position { line: 3, character: 7 });

        let children = symbols[1].children.as_ref().unwrap();
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["uses", "secrets"]);
        assert_eq!(children[0].detail.as_deref(), Some("\"./b\""));
        assert_eq!(children[1].detail.as_deref(), Some("2 items"));
    }

    #[test]
    fn test_blocks_without_name_are_skipped() {
        let symbols = get_document_symbols(&Compilation::new("action {\n}\naction \"a\" {}"));

        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].name, "a");
    }
}
