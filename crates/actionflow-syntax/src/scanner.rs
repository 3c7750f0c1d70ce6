use crate::diagnostics::{DiagnosticBag, Position, Span};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(11);
    m.insert("version", TokenKind::VersionKeyword);
    m.insert("workflow", TokenKind::WorkflowKeyword);
    m.insert("action", TokenKind::ActionKeyword);
    m.insert("on", TokenKind::OnKeyword);
    m.insert("resolves", TokenKind::ResolvesKeyword);
    m.insert("uses", TokenKind::UsesKeyword);
    m.insert("needs", TokenKind::NeedsKeyword);
    m.insert("runs", TokenKind::RunsKeyword);
    m.insert("args", TokenKind::ArgsKeyword);
    m.insert("env", TokenKind::EnvKeyword);
    m.insert("secrets", TokenKind::SecretsKeyword);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    VersionKeyword,
    WorkflowKeyword,
    ActionKeyword,
    OnKeyword,
    ResolvesKeyword,
    UsesKeyword,
    NeedsKeyword,
    RunsKeyword,
    ArgsKeyword,
    EnvKeyword,
    SecretsKeyword,
    Equal,
    Comma,
    LeftCurlyBracket,
    RightCurlyBracket,
    LeftSquareBracket,
    RightSquareBracket,
    Identifier,
    Comment,
    IntegerLiteral,
    StringLiteral,
    Missing,
    Unrecognized,
}

impl TokenKind {
    /// Keywords that may start a property inside a block.
    pub const PROPERTY_KEYWORDS: [TokenKind; 8] = [
        TokenKind::OnKeyword,
        TokenKind::ResolvesKeyword,
        TokenKind::UsesKeyword,
        TokenKind::NeedsKeyword,
        TokenKind::RunsKeyword,
        TokenKind::ArgsKeyword,
        TokenKind::EnvKeyword,
        TokenKind::SecretsKeyword,
    ];

    /// Keywords that start a top-level statement.
    pub const TOP_LEVEL_KEYWORDS: [TokenKind; 3] = [
        TokenKind::VersionKeyword,
        TokenKind::WorkflowKeyword,
        TokenKind::ActionKeyword,
    ];

    /// User-facing name used in diagnostics and completion labels.
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::VersionKeyword => "version",
            TokenKind::WorkflowKeyword => "workflow",
            TokenKind::ActionKeyword => "action",
            TokenKind::OnKeyword => "on",
            TokenKind::ResolvesKeyword => "resolves",
            TokenKind::UsesKeyword => "uses",
            TokenKind::NeedsKeyword => "needs",
            TokenKind::RunsKeyword => "runs",
            TokenKind::ArgsKeyword => "args",
            TokenKind::EnvKeyword => "env",
            TokenKind::SecretsKeyword => "secrets",
            TokenKind::Equal => "=",
            TokenKind::Comma => ",",
            TokenKind::LeftCurlyBracket => "{",
            TokenKind::RightCurlyBracket => "}",
            TokenKind::LeftSquareBracket => "[",
            TokenKind::RightSquareBracket => "]",
            TokenKind::Identifier => "identifier",
            TokenKind::Comment => "comment",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::StringLiteral => "string",
            TokenKind::Missing => "missing",
            TokenKind::Unrecognized => "unrecognized",
        }
    }

    pub fn is_keyword(self) -> bool {
        Self::TOP_LEVEL_KEYWORDS.contains(&self) || Self::PROPERTY_KEYWORDS.contains(&self)
    }

    /// Tokens the parser never sees.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Unrecognized)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    /// Zero-width placeholder produced by parser recovery.
    pub fn missing(span: Span) -> Self {
        Self::new(TokenKind::Missing, span, "")
    }

    pub fn is_missing(&self) -> bool {
        self.kind == TokenKind::Missing
    }
}

/// Converts source text into tokens, comments and unrecognized characters included.
///
/// Scanning never fails: problems are recorded in `bag` and the offending
/// characters still produce tokens so ranges stay aligned with the text.
pub fn scan(text: &str, bag: &mut DiagnosticBag) -> Vec<Token> {
    Scanner::new(text, bag).run()
}

struct Scanner<'a> {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
    bag: &'a mut DiagnosticBag,
}

impl<'a> Scanner<'a> {
    fn new(text: &str, bag: &'a mut DiagnosticBag) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            line: 0,
            column: 0,
            tokens: Vec::with_capacity(text.len() / 4),
            bag,
        }
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    #[inline]
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Consumes one character that is not a line break.
    #[inline]
    fn bump(&mut self) {
        if let Some(ch) = self.peek(0) {
            self.index += 1;
            self.column += ch.len_utf16();
        }
    }

    fn push(&mut self, kind: TokenKind, start_index: usize, start: Position) -> Span {
        let text: String = self.chars[start_index..self.index].iter().collect();
        let span = Span::new(start, self.position());
        self.tokens.push(Token::new(kind, span, text));
        span
    }

    fn run(mut self) -> Vec<Token> {
        while let Some(ch) = self.peek(0) {
            match ch {
                '\r' => {
                    self.index += if self.peek(1) == Some('\n') { 2 } else { 1 };
                    self.line += 1;
                    self.column = 0;
                }
                '\n' => {
                    self.index += 1;
                    self.line += 1;
                    self.column = 0;
                }
                ' ' | '\t' => self.bump(),
                '=' => self.punctuation(TokenKind::Equal),
                ',' => self.punctuation(TokenKind::Comma),
                '{' => self.punctuation(TokenKind::LeftCurlyBracket),
                '}' => self.punctuation(TokenKind::RightCurlyBracket),
                '[' => self.punctuation(TokenKind::LeftSquareBracket),
                ']' => self.punctuation(TokenKind::RightSquareBracket),
                '#' => self.comment(),
                '/' if self.peek(1) == Some('/') => self.comment(),
                '"' => self.string_literal(),
                '0'..='9' => self.integer_literal(),
                '_' | 'a'..='z' | 'A'..='Z' => self.keyword_or_identifier(),
                other => {
                    let start_index = self.index;
                    let start = self.position();
                    self.bump();
                    let span = self.push(TokenKind::Unrecognized, start_index, start);
                    self.bag.unrecognized_character(other, span);
                }
            }
        }

        self.tokens
    }

    fn punctuation(&mut self, kind: TokenKind) {
        let start_index = self.index;
        let start = self.position();
        self.bump();
        self.push(kind, start_index, start);
    }

    fn comment(&mut self) {
        let start_index = self.index;
        let start = self.position();

        while let Some(ch) = self.peek(0) {
            if ch == '\r' || ch == '\n' {
                break;
            }
            self.bump();
        }

        self.push(TokenKind::Comment, start_index, start);
    }

    fn string_literal(&mut self) {
        let start_index = self.index;
        let start = self.position();
        self.bump();

        loop {
            match self.peek(0) {
                Some('"') => {
                    self.bump();
                    self.push(TokenKind::StringLiteral, start_index, start);
                    return;
                }
                None | Some('\r') | Some('\n') => {
                    let span = self.push(TokenKind::StringLiteral, start_index, start);
                    self.bag.unterminated_string_literal(span);
                    return;
                }
                Some('\\') => {
                    self.bump();
                    match self.peek(0) {
                        Some('\\' | '/' | '"' | 'b' | 'f' | 'n' | 'r' | 't') => self.bump(),
                        // A line break is never swallowed by an escape.
                        None | Some('\r') | Some('\n') => {}
                        Some(escaped) => {
                            let span = Span::single(self.line, self.column, escaped.len_utf16());
                            self.bag.unsupported_escape_sequence(escaped, span);
                            self.bump();
                        }
                    }
                }
                Some(ch) => {
                    if ch == '\u{7f}' || ch <= '\u{1f}' {
                        let span = Span::single(self.line, self.column, 1);
                        self.bag.unrecognized_character(ch, span);
                    }
                    self.bump();
                }
            }
        }
    }

    fn integer_literal(&mut self) {
        let start_index = self.index;
        let start = self.position();

        while matches!(self.peek(0), Some('0'..='9')) {
            self.bump();
        }

        self.push(TokenKind::IntegerLiteral, start_index, start);
    }

    fn keyword_or_identifier(&mut self) {
        let start_index = self.index;
        let start = self.position();

        while matches!(self.peek(0), Some('_' | 'a'..='z' | 'A'..='Z' | '0'..='9')) {
            self.bump();
        }

        let word: String = self.chars[start_index..self.index].iter().collect();
        let kind = KEYWORDS.get(word.as_str()).copied().unwrap_or(TokenKind::Identifier);
        self.push(kind, start_index, start);
    }
}
