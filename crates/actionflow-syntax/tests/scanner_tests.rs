use actionflow_syntax::scanner::{TokenKind, scan};
use actionflow_syntax::{DiagnosticBag, DiagnosticCode, Position, Span};

#[test]
fn test_all_keywords() {
    let source = "version workflow action on resolves uses needs runs args env secrets";
    let mut bag = DiagnosticBag::new();
    let tokens = scan(source, &mut bag);

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

    assert!(matches!(kinds[0], TokenKind::VersionKeyword));
    assert!(matches!(kinds[1], TokenKind::WorkflowKeyword));
    assert!(matches!(kinds[2], TokenKind::ActionKeyword));
    assert!(matches!(kinds[3], TokenKind::OnKeyword));
    assert!(matches!(kinds[4], TokenKind::ResolvesKeyword));
    assert!(matches!(kinds[5], TokenKind::UsesKeyword));
    assert!(matches!(kinds[6], TokenKind::NeedsKeyword));
    assert!(matches!(kinds[7], TokenKind::RunsKeyword));
    assert!(matches!(kinds[8], TokenKind::ArgsKeyword));
    assert!(matches!(kinds[9], TokenKind::EnvKeyword));
    assert!(matches!(kinds[10], TokenKind::SecretsKeyword));
    assert!(bag.is_empty());
}

#[test]
fn test_keywords_are_case_sensitive() {
    let mut bag = DiagnosticBag::new();
    let tokens = scan("Action USES", &mut bag);

    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_integer_followed_by_identifier() {
    let mut bag = DiagnosticBag::new();
    let tokens = scan("12abc", &mut bag);

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
    assert_eq!(tokens[0].text, "12");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].span.start, Position::new(0, 2));
}

#[test]
fn test_unrecognized_characters_keep_scanning() {
    let mut bag = DiagnosticBag::new();
    let tokens = scan("$ action % \"x\"", &mut bag);

    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Unrecognized,
            TokenKind::ActionKeyword,
            TokenKind::Unrecognized,
            TokenKind::StringLiteral,
        ]
    );

    assert_eq!(bag.len(), 2);
    assert_eq!(bag.items()[0].message, "The character '$' is unrecognizable.");
    assert_eq!(bag.items()[1].span, Span::single(0, 9, 1));
}

#[test]
fn test_token_spans_track_lines() {
    let source = "action \"a\" {\n\tuses = \"./ci\"\n}";
    let mut bag = DiagnosticBag::new();
    let tokens = scan(source, &mut bag);

    assert_eq!(tokens[3].kind, TokenKind::UsesKeyword);
    assert_eq!(tokens[3].span, Span::single(1, 1, 4));
    assert_eq!(tokens[5].span, Span::single(1, 8, 6));
    assert_eq!(tokens[6].span, Span::single(2, 0, 1));
}

#[test]
fn test_comment_stops_at_carriage_return() {
    let mut bag = DiagnosticBag::new();
    let tokens = scan("# note\r\nversion", &mut bag);

    assert_eq!(tokens[0].text, "# note");
    assert_eq!(tokens[1].span.start, Position::new(1, 0));
}

#[test]
fn test_every_escape_is_accepted() {
    let mut bag = DiagnosticBag::new();
    scan(r#""\\ \/ \" \b \f \n \r \t""#, &mut bag);

    assert!(bag.is_empty(), "{:?}", bag.items());
}

#[test]
fn test_escape_before_line_break_leaves_string_unterminated() {
    let mut bag = DiagnosticBag::new();
    let tokens = scan("\"abc\\\nuses", &mut bag);

    assert_eq!(tokens[0].text, "\"abc\\");
    assert_eq!(tokens[1].kind, TokenKind::UsesKeyword);
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.items()[0].code, DiagnosticCode::UnterminatedStringLiteral);
}
