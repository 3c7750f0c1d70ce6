//! Canonical layout for workflow documents.
//!
//! Comments are not part of the syntax tree, so they are first attached to
//! neighbouring tokens as trivia and then re-emitted while the tree is
//! printed line by line.

use crate::compilation::Compilation;
use actionflow_syntax::{
    ArrayPropertySyntax, BlockSyntax, ObjectPropertySyntax, Position, PropertySyntax, Token, TokenKind,
    TopLevelSyntax, VersionSyntax,
};
use smallvec::SmallVec;
use std::collections::HashMap;

type Comments = SmallVec<[String; 2]>;

#[derive(Debug, Default)]
struct Trivia {
    leading: Comments,
    trailing: Option<String>,
}

/// Formats the document, indenting each level with `indent`.
///
/// Returns `None` when the document has syntax errors, since parts of the
/// source are then missing from the tree.
pub fn format(compilation: &Compilation, indent: &str) -> Option<String> {
    if compilation.has_syntax_errors() {
        return None;
    }

    let (trivia, trailing) = attach_trivia(compilation.tokens());
    let mut printer = Printer {
        trivia,
        lines: Vec::new(),
        pending: Comments::new(),
    };

    for (index, item) in compilation.syntax().items().into_iter().enumerate() {
        if index > 0 {
            printer.blank_line();
        }
        match item {
            TopLevelSyntax::Version(version) => printer.version(version),
            TopLevelSyntax::Block(block) => printer.block(block),
        }
    }
    printer.finish(trailing);

    let newline = if compilation.text().contains("\r\n") { "\r\n" } else { "\n" };
    Some(printer.render(indent, newline))
}

/// Splits comments into trivia keyed by the start of the token they belong
/// to, plus the comments that trail the whole document.
fn attach_trivia(tokens: &[Token]) -> (HashMap<Position, Trivia>, Comments) {
    let mut trivia: HashMap<Position, Trivia> = HashMap::new();
    let mut pending = Comments::new();
    let mut previous: Option<&Token> = None;

    for token in tokens {
        if token.kind != TokenKind::Comment {
            if !pending.is_empty() {
                trivia.entry(token.span.start).or_default().leading = std::mem::take(&mut pending);
            }
            previous = Some(token);
            continue;
        }

        if let Some(previous) = previous
            && pending.is_empty()
            && previous.span.end.line == token.span.start.line
        {
            let entry = trivia.entry(previous.span.start).or_default();
            if entry.trailing.is_none() {
                entry.trailing = Some(token.text.clone());
                continue;
            }
        }
        pending.push(token.text.clone());
    }

    (trivia, pending)
}

#[derive(Debug)]
struct Line {
    depth: usize,
    text: String,
    comment: Option<String>,
}

struct Printer {
    trivia: HashMap<Position, Trivia>,
    lines: Vec<Line>,
    /// Comments waiting for the start of the next line.
    pending: Comments,
}

impl Printer {
    fn blank_line(&mut self) {
        self.lines.push(Line {
            depth: 0,
            text: String::new(),
            comment: None,
        });
    }

    /// Emits one line made of `tokens`. The first token is padded to
    /// `key_width`; comments before it are placed at `comment_depth`.
    fn line(&mut self, depth: usize, comment_depth: usize, tokens: &[&Token], key_width: usize) {
        let mut line = Line {
            depth,
            text: String::new(),
            comment: None,
        };

        for (index, token) in tokens.iter().enumerate() {
            let trivia = self.trivia.remove(&token.span.start).unwrap_or_default();

            if index == 0 {
                for comment in self.pending.drain(..).chain(trivia.leading) {
                    self.lines.push(Line {
                        depth: comment_depth,
                        text: comment,
                        comment: None,
                    });
                }
                line.text.push_str(&token.text);
                for _ in token.text.chars().count()..key_width {
                    line.text.push(' ');
                }
            } else {
                self.pending.extend(trivia.leading);
                if token.kind != TokenKind::Comma {
                    line.text.push(' ');
                }
                line.text.push_str(&token.text);
            }

            if let Some(comment) = trivia.trailing {
                if line.comment.is_none() {
                    line.comment = Some(comment);
                } else {
                    self.pending.push(comment);
                }
            }
        }

        self.lines.push(line);
    }

    fn version(&mut self, version: &VersionSyntax) {
        self.line(0, 0, &[&version.version, &version.equal, &version.integer], 0);
    }

    fn block(&mut self, block: &BlockSyntax) {
        self.line(0, 0, &[&block.keyword, &block.name, &block.open_bracket], 0);

        let key_width = block
            .properties
            .iter()
            .map(|p| p.key().text.chars().count())
            .max()
            .unwrap_or(0);

        let mut previous_multiline = false;
        for (index, property) in block.properties.iter().enumerate() {
            let multiline = !matches!(**property, PropertySyntax::String(_));
            if index > 0 && (multiline || previous_multiline) {
                self.blank_line();
            }
            previous_multiline = multiline;

            match &**property {
                PropertySyntax::String(string) => {
                    self.line(1, 1, &[&string.key, &string.equal, &string.value], key_width)
                }
                PropertySyntax::Array(array) => self.array(array, key_width),
                PropertySyntax::Object(object) => self.object(object, key_width),
            }
        }

        self.line(0, 1, &[&block.close_bracket], 0);
    }

    fn array(&mut self, array: &ArrayPropertySyntax, key_width: usize) {
        self.line(1, 1, &[&array.key, &array.equal, &array.open_bracket], key_width);
        for item in &array.items {
            match &item.comma {
                Some(comma) => self.line(2, 2, &[&item.value, comma], 0),
                None => self.line(2, 2, &[&item.value], 0),
            }
        }
        self.line(1, 2, &[&array.close_bracket], 0);
    }

    fn object(&mut self, object: &ObjectPropertySyntax, key_width: usize) {
        self.line(1, 1, &[&object.key, &object.equal, &object.open_bracket], key_width);

        let name_width = object
            .members
            .iter()
            .map(|m| m.name.text.chars().count())
            .max()
            .unwrap_or(0);
        for member in &object.members {
            match &member.comma {
                Some(comma) => self.line(2, 2, &[&member.name, &member.equal, &member.value, comma], name_width),
                None => self.line(2, 2, &[&member.name, &member.equal, &member.value], name_width),
            }
        }
        self.line(1, 2, &[&object.close_bracket], 0);
    }

    fn finish(&mut self, trailing: Comments) {
        for comment in self.pending.drain(..) {
            self.lines.push(Line {
                depth: 0,
                text: comment,
                comment: None,
            });
        }

        if trailing.is_empty() {
            return;
        }
        if !self.lines.is_empty() {
            self.blank_line();
        }
        for comment in trailing {
            self.lines.push(Line {
                depth: 0,
                text: comment,
                comment: None,
            });
        }
    }

    fn render(self, indent: &str, newline: &str) -> String {
        let mut output = String::new();
        for line in self.lines {
            if !line.text.is_empty() {
                output.push_str(&indent.repeat(line.depth));
                output.push_str(&line.text);
            }
            if let Some(comment) = line.comment {
                output.push(' ');
                output.push_str(&comment);
            }
            output.push_str(newline);
        }
        output
    }
}
