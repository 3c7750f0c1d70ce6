use actionflow_semantic::Compilation;
use tower_lsp::lsp_types::*;

/// One edit replacing the whole document, or `None` when the document has
/// syntax errors or is already formatted.
pub fn format_document(compilation: &Compilation, options: &FormattingOptions) -> Option<Vec<TextEdit>> {
    let indent = if options.insert_spaces {
        " ".repeat(options.tab_size as usize)
    } else {
        "\t".to_string()
    };

    let formatted = actionflow_semantic::format(compilation, &indent)?;
    if formatted == compilation.text() {
        return None;
    }

    Some(vec![TextEdit {
        range: Range {
            start: Position { line: 0, character: 0 },
            end: end_position(compilation.text()),
        },
        new_text: formatted,
    }])
}

/// Position just past the last character, columns in UTF-16 units.
fn end_position(text: &str) -> Position {
    let mut line = 0;
    let mut character = 0;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                line += 1;
                character = 0;
            }
            '\n' => {
                line += 1;
                character = 0;
            }
            _ => character += c.len_utf16() as u32,
        }
    }

    Position { line, character }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(insert_spaces: bool, tab_size: u32) -> FormattingOptions {
        FormattingOptions {
            tab_size,
            insert_spaces,
            ..Default::default()
        }
    }

    #[test]
    fn test_whole_document_edit() {
        let compilation = Compilation::new("action \"a\" {\nuses = \"./a\"\n}");
        let edits = format_document(&compilation, &options(true, 4)).unwrap();

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range.end, Position { line: 2, character: 1 });
        assert_eq!(edits[0].new_text, "action \"a\" {\n    uses = \"./a\"\n}\n");
    }

    #[test]
    fn test_tabs() {
        let compilation = Compilation::new("action \"a\" { uses = \"./a\" }");
        let edits = format_document(&compilation, &options(false, 4)).unwrap();

        assert_eq!(edits[0].new_text, "action \"a\" {\n\tuses = \"./a\"\n}\n");
    }

    #[test]
    fn test_nothing_to_do() {
        let formatted = Compilation::new("action \"a\" {\n  uses = \"./a\"\n}\n");
        let broken = Compilation::new("action \"a\" { uses = }");

        assert!(format_document(&formatted, &options(true, 2)).is_none());
        assert!(format_document(&broken, &options(true, 2)).is_none());
    }

    #[test]
    fn test_end_position() {
        assert_eq!(end_position(""), Position { line: 0, character: 0 });
        assert_eq!(end_position("a\r\nb\rc\n"), Position { line: 3, character: 0 });
        assert_eq!(end_position("# 😀"), Position { line: 0, character: 4 });
    }
}
