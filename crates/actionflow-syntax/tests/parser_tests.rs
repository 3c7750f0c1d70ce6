use actionflow_syntax::{
    BlockKind, DiagnosticBag, DiagnosticCode, DocumentSyntax, PropertySyntax, TopLevelSyntax, parse, scan,
};

fn parse_source(source: &str) -> (DocumentSyntax, DiagnosticBag) {
    let mut bag = DiagnosticBag::new();
    let tokens = scan(source, &mut bag);
    let document = parse(&tokens, &mut bag);
    (document, bag)
}

#[test]
fn test_workflow_and_action() {
    let source = r#"
workflow "Build" {
  on = "push"
  resolves = ["Test"]
}

action "Test" {
  uses = "docker://alpine"
  runs = "make test"
}
"#;
    let (document, bag) = parse_source(source);

    assert!(bag.is_empty(), "{:?}", bag.items());
    assert_eq!(document.blocks.len(), 2);
    assert_eq!(document.blocks[0].block_kind, BlockKind::Workflow);
    assert_eq!(document.blocks[1].block_kind, BlockKind::Action);
    assert_eq!(document.blocks[1].properties.len(), 2);
}

#[test]
fn test_items_are_in_source_order() {
    let (document, _) = parse_source("action \"a\" {}\nversion = 0\nworkflow \"w\" {}");
    let items = document.items();

    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], TopLevelSyntax::Block(b) if b.block_kind == BlockKind::Action));
    assert!(matches!(items[1], TopLevelSyntax::Version(_)));
    assert!(matches!(items[2], TopLevelSyntax::Block(b) if b.block_kind == BlockKind::Workflow));
}

#[test]
fn test_stray_value_is_skipped_until_block_end() {
    let (document, bag) = parse_source("action \"a\" { uses \"./ci\" }");

    assert_eq!(bag.len(), 2);
    assert_eq!(bag.items()[0].message, "A token of kind 'string' was not expected here.");
    assert_eq!(bag.items()[1].message, "A token of kind '=' was expected here.");
    match &*document.blocks[0].properties[0] {
        PropertySyntax::String(property) => {
            assert!(property.equal.is_missing());
            assert!(property.value.is_missing());
        }
        other => panic!("Expected string property, got {:?}", other),
    }
}

#[test]
fn test_missing_value_lists_alternatives() {
    let (_, bag) = parse_source("action \"a\" { uses = }");

    assert_eq!(
        bag.items()[0].message,
        "A token of kind 'string' or '{' or '[' was expected here."
    );
}

#[test]
fn test_array_stops_at_block_end() {
    let (document, bag) = parse_source("action \"a\" { needs = [\"b\" }");

    assert_eq!(bag.len(), 1);
    assert_eq!(bag.items()[0].message, "A token of kind 'string' was expected here.");
    match &*document.blocks[0].properties[0] {
        PropertySyntax::Array(array) => {
            assert_eq!(array.items.len(), 1);
            assert!(array.close_bracket.is_missing());
        }
        other => panic!("Expected array property, got {:?}", other),
    }
    assert!(!document.blocks[0].close_bracket.is_missing());
}

#[test]
fn test_object_member_without_value_gives_way_to_next_member() {
    let (document, bag) = parse_source("action \"a\" { env = { A = \n B = \"2\" } }");

    assert_eq!(bag.len(), 1);
    match &*document.blocks[0].properties[0] {
        PropertySyntax::Object(object) => {
            assert_eq!(object.members.len(), 2);
            assert!(object.members[0].value.is_missing());
            assert_eq!(object.members[1].value.text, "\"2\"");
        }
        other => panic!("Expected object property, got {:?}", other),
    }
}

#[test]
fn test_unknown_property_keyword_is_skipped() {
    let (document, bag) = parse_source("action \"a\" { foo = \"x\" uses = \"./ci\" }");

    assert_eq!(document.blocks[0].properties.len(), 1);
    assert_eq!(bag.len(), 3);
    assert!(bag.items().iter().all(|d| d.code == DiagnosticCode::UnexpectedToken));
    assert_eq!(bag.items()[0].message, "A token of kind 'identifier' was not expected here.");
}

#[test]
fn test_version_without_integer() {
    let (document, bag) = parse_source("version =\naction \"a\" {}");

    assert_eq!(document.versions.len(), 1);
    assert!(document.versions[0].integer.is_missing());
    assert_eq!(document.blocks.len(), 1);
    assert_eq!(bag.len(), 1);
}

#[test]
fn test_binary_garbage_never_panics() {
    let source = "\u{0}\u{1}{}[]==,,\"\\\n}}}{{{ action action \"\" { uses = [ { ] } }";
    let (_, bag) = parse_source(source);

    assert!(!bag.is_empty());
}
