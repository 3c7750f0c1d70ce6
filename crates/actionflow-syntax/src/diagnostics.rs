use std::fmt;

/// Highest `version` value the binder accepts.
pub const MAXIMUM_SUPPORTED_VERSION: u32 = 0;
/// Upper bound on distinct secrets referenced across one document.
pub const MAXIMUM_SUPPORTED_SECRETS: usize = 100;
/// Upper bound on distinct actions declared in one document.
pub const MAXIMUM_SUPPORTED_ACTIONS: usize = 100;

/// Every code below this mark comes from scanning or parsing.
pub const PARSING_ERRORS_MARK: u16 = 6;

/// Zero-based location. Columns count UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A span on one line starting at `column` and `width` units wide.
    pub fn single(line: usize, column: usize, width: usize) -> Self {
        Self {
            start: Position::new(line, column),
            end: Position::new(line, column + width),
        }
    }

    pub fn merge(&self, other: &Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Inclusive on both ends, so a cursor right after a token still hits it.
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Stable numeric codes, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum DiagnosticCode {
    // Scanning
    UnrecognizedCharacter = 1,
    UnterminatedStringLiteral = 2,
    UnsupportedEscapeSequence = 3,

    // Parsing
    MissingToken = 4,
    UnexpectedToken = 5,

    // Binding
    MultipleVersions = 6,
    UnrecognizedVersion = 7,
    VersionAfterBlock = 8,
    ValueIsNotString = 9,
    ValueIsNotStringOrArray = 10,
    ValueIsNotAnObject = 11,
    PropertyAlreadyDefined = 12,
    PropertyMustBeDefined = 13,
    InvalidProperty = 14,
    DuplicateKey = 15,

    // Block analysis
    TooManyActions = 16,
    DuplicateBlock = 17,
    CircularDependency = 18,

    // Property analysis
    ActionDoesNotExist = 19,
    TooManySecrets = 20,
    DuplicateSecrets = 21,
    DuplicateActions = 22,
    ReservedEnvironmentVariable = 23,
    UnrecognizedEvent = 24,
    InvalidUses = 25,
}

impl DiagnosticCode {
    pub fn number(self) -> u16 {
        self as u16
    }

    pub fn is_syntax_error(self) -> bool {
        self.number() < PARSING_ERRORS_MARK
    }

    /// Redundant list entries are harmless, everything else is an error.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::DuplicateActions | DiagnosticCode::DuplicateSecrets => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:03}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, span: Span, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            severity: code.severity(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Append-only sink shared by every stage of a compilation.
///
/// Each reporting method owns the wording of one diagnostic so messages stay
/// consistent between the CLI, the language server and the tests.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Diagnostic> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    fn report(&mut self, code: DiagnosticCode, span: Span, message: String) {
        self.items.push(Diagnostic::new(code, span, message));
    }

    pub fn unrecognized_character(&mut self, character: char, span: Span) {
        self.report(
            DiagnosticCode::UnrecognizedCharacter,
            span,
            format!("The character '{}' is unrecognizable.", character.escape_debug()),
        );
    }

    pub fn unterminated_string_literal(&mut self, span: Span) {
        self.report(
            DiagnosticCode::UnterminatedStringLiteral,
            span,
            "This string literal must end with double quotes.".to_string(),
        );
    }

    pub fn unsupported_escape_sequence(&mut self, character: char, span: Span) {
        self.report(
            DiagnosticCode::UnsupportedEscapeSequence,
            span,
            format!("The character '{}' is not a supported escape sequence.", character.escape_debug()),
        );
    }

    /// `expected` holds the token descriptions, already deduplicated.
    pub fn missing_token(&mut self, expected: &[&str], span: Span, at_end_of_file: bool) {
        let kinds = expected
            .iter()
            .map(|kind| format!("'{}'", kind))
            .collect::<Vec<_>>()
            .join(" or ");
        let place = if at_end_of_file { "after this" } else { "here" };
        self.report(
            DiagnosticCode::MissingToken,
            span,
            format!("A token of kind {} was expected {}.", kinds, place),
        );
    }

    pub fn unexpected_token(&mut self, description: &str, span: Span) {
        self.report(
            DiagnosticCode::UnexpectedToken,
            span,
            format!("A token of kind '{}' was not expected here.", description),
        );
    }

    pub fn multiple_versions(&mut self, span: Span) {
        self.report(
            DiagnosticCode::MultipleVersions,
            span,
            "A version is already specified for this document. You can only specify one.".to_string(),
        );
    }

    pub fn unrecognized_version(&mut self, text: &str, span: Span) {
        self.report(
            DiagnosticCode::UnrecognizedVersion,
            span,
            format!(
                "The version '{}' is not valid. Only versions up to '{}' are supported.",
                text, MAXIMUM_SUPPORTED_VERSION
            ),
        );
    }

    pub fn version_after_block(&mut self, span: Span) {
        self.report(
            DiagnosticCode::VersionAfterBlock,
            span,
            "Version must be specified before all actions or workflows are defined.".to_string(),
        );
    }

    pub fn value_is_not_string(&mut self, span: Span) {
        self.report(
            DiagnosticCode::ValueIsNotString,
            span,
            "Value must be a single string.".to_string(),
        );
    }

    pub fn value_is_not_string_or_array(&mut self, span: Span) {
        self.report(
            DiagnosticCode::ValueIsNotStringOrArray,
            span,
            "Value must be a single string or an array of strings.".to_string(),
        );
    }

    pub fn value_is_not_an_object(&mut self, span: Span) {
        self.report(
            DiagnosticCode::ValueIsNotAnObject,
            span,
            "Value must be an object.".to_string(),
        );
    }

    pub fn property_already_defined(&mut self, property: &str, span: Span) {
        self.report(
            DiagnosticCode::PropertyAlreadyDefined,
            span,
            format!("A property '{}' is already defined in this block.", property),
        );
    }

    pub fn property_must_be_defined(&mut self, property: &str, block: &str, span: Span) {
        self.report(
            DiagnosticCode::PropertyMustBeDefined,
            span,
            format!("This '{}' must define a '{}' property.", block, property),
        );
    }

    pub fn invalid_property(&mut self, property: &str, block: &str, span: Span) {
        self.report(
            DiagnosticCode::InvalidProperty,
            span,
            format!("A property of kind '{}' cannot be defined for a '{}' block.", property, block),
        );
    }

    pub fn duplicate_key(&mut self, key: &str, span: Span) {
        self.report(
            DiagnosticCode::DuplicateKey,
            span,
            format!("A key with the name '{}' is already defined.", key),
        );
    }

    pub fn too_many_actions(&mut self, span: Span) {
        self.report(
            DiagnosticCode::TooManyActions,
            span,
            format!(
                "Too many actions defined. The maximum currently supported is '{}'.",
                MAXIMUM_SUPPORTED_ACTIONS
            ),
        );
    }

    pub fn duplicate_block(&mut self, name: &str, span: Span) {
        self.report(
            DiagnosticCode::DuplicateBlock,
            span,
            format!("This file already defines another workflow or action with the name '{}'.", name),
        );
    }

    pub fn circular_dependency(&mut self, action: &str, span: Span) {
        self.report(
            DiagnosticCode::CircularDependency,
            span,
            format!("The action '{}' has a circular dependency on itself.", action),
        );
    }

    pub fn action_does_not_exist(&mut self, action: &str, span: Span) {
        self.report(
            DiagnosticCode::ActionDoesNotExist,
            span,
            format!("The action '{}' does not exist in the same workflow file.", action),
        );
    }

    pub fn too_many_secrets(&mut self, span: Span) {
        self.report(
            DiagnosticCode::TooManySecrets,
            span,
            format!(
                "Too many secrets defined. The maximum currently supported is '{}'.",
                MAXIMUM_SUPPORTED_SECRETS
            ),
        );
    }

    pub fn duplicate_secrets(&mut self, secret: &str, span: Span) {
        self.report(
            DiagnosticCode::DuplicateSecrets,
            span,
            format!("This property has duplicate '{}' secrets.", secret),
        );
    }

    pub fn duplicate_actions(&mut self, action: &str, span: Span) {
        self.report(
            DiagnosticCode::DuplicateActions,
            span,
            format!("This property has duplicate '{}' actions.", action),
        );
    }

    pub fn reserved_environment_variable(&mut self, span: Span) {
        self.report(
            DiagnosticCode::ReservedEnvironmentVariable,
            span,
            "Environment variables starting with 'GITHUB_' are reserved.".to_string(),
        );
    }

    pub fn unrecognized_event(&mut self, event: &str, span: Span) {
        self.report(
            DiagnosticCode::UnrecognizedEvent,
            span,
            format!("The event '{}' is not a known event type.", event),
        );
    }

    pub fn invalid_uses(&mut self, span: Span) {
        self.report(
            DiagnosticCode::InvalidUses,
            span,
            "The 'uses' property must be a path, a Docker image, or an owner/repo@ref remote.".to_string(),
        );
    }
}
