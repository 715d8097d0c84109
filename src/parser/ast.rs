//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for TOML syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    fn text_range(&self) -> TextRange {
        self.syntax().text_range()
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Root
// ============================================================================

ast_node!(TomlFile, TOML_FILE);

impl TomlFile {
    pub(super) fn new_root(node: SyntaxNode) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::TOML_FILE);
        Self(node)
    }

    /// Key/value pairs before the first table header
    pub fn entries(&self) -> impl Iterator<Item = KeyValue> + '_ {
        self.0.children().filter_map(KeyValue::cast)
    }

    /// All `[table]` and `[[array.table]]` sections in document order
    pub fn tables(&self) -> impl Iterator<Item = TableLike> + '_ {
        self.0.children().filter_map(TableLike::cast)
    }

    /// The section whose header starts at or before `offset`
    ///
    /// Blank lines between sections belong to the file node, so the owning
    /// section of an offset is found by position rather than by ancestry.
    pub fn table_at(&self, offset: TextSize) -> Option<TableLike> {
        self.tables()
            .take_while(|table| table.text_range().start() < offset)
            .last()
    }
}

// ============================================================================
// Tables
// ============================================================================

ast_node!(Table, TABLE);
ast_node!(ArrayTable, ARRAY_TABLE);

/// A `[table]` or an `[[array.table]]` element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableLike {
    Table(Table),
    ArrayTable(ArrayTable),
}

impl AstNode for TableLike {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::TABLE | SyntaxKind::ARRAY_TABLE)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::TABLE => Some(Self::Table(Table(node))),
            SyntaxKind::ARRAY_TABLE => Some(Self::ArrayTable(ArrayTable(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Table(n) => n.syntax(),
            Self::ArrayTable(n) => n.syntax(),
        }
    }
}

impl TableLike {
    pub fn is_array(&self) -> bool {
        matches!(self, Self::ArrayTable(_))
    }

    pub fn header(&self) -> Option<TableHeader> {
        self.syntax().children().find_map(TableHeader::cast)
    }

    /// Unquoted name of the first header segment (`dependencies` for `[[dependencies.x]]`)
    pub fn name(&self) -> Option<SmolStr> {
        self.header()?.key()?.first_segment().map(|s| s.name())
    }

    pub fn entries(&self) -> impl Iterator<Item = KeyValue> + '_ {
        self.syntax().children().filter_map(KeyValue::cast)
    }

    /// Own-line comments directly above the header
    pub fn doc_comments(&self) -> Vec<String> {
        leading_comments(self.syntax())
    }
}

ast_node!(TableHeader, TABLE_HEADER);

impl TableHeader {
    pub fn key(&self) -> Option<Key> {
        self.0.children().find_map(Key::cast)
    }

    pub fn is_array(&self) -> bool {
        self.0
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::ARRAY_TABLE)
    }

    /// Comment on the same line after the closing bracket
    pub fn trailing_comment(&self) -> Option<SyntaxToken> {
        trailing_comment(&self.0)
    }
}

// ============================================================================
// Key/value pairs
// ============================================================================

ast_node!(KeyValue, KEY_VALUE);

impl KeyValue {
    pub fn key(&self) -> Option<Key> {
        self.0.children().find_map(Key::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }

    pub fn eq_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::EQ)
    }

    /// Dotted key text with quotes removed (`a."b.c"` → `a.b.c`)
    pub fn key_text(&self) -> Option<String> {
        self.key().map(|k| k.text())
    }

    pub fn trailing_comment(&self) -> Option<SyntaxToken> {
        trailing_comment(&self.0)
    }

    /// Own-line comments directly above the pair
    pub fn doc_comments(&self) -> Vec<String> {
        leading_comments(&self.0)
    }
}

ast_node!(Key, KEY);

impl Key {
    pub fn segments(&self) -> impl Iterator<Item = KeySegment> + '_ {
        self.0.children().filter_map(KeySegment::cast)
    }

    pub fn first_segment(&self) -> Option<KeySegment> {
        self.segments().next()
    }

    pub fn text(&self) -> String {
        self.segments()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(".")
    }
}

ast_node!(KeySegment, KEY_SEGMENT);

impl KeySegment {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0.first_token()
    }

    /// The segment name with quotes and escapes resolved
    pub fn name(&self) -> SmolStr {
        match self.token() {
            Some(token) => match token.kind() {
                SyntaxKind::BASIC_STRING | SyntaxKind::LITERAL_STRING => {
                    SmolStr::new(unquote(token.kind(), token.text()))
                }
                _ => SmolStr::new(token.text()),
            },
            None => SmolStr::default(),
        }
    }
}

// ============================================================================
// Values
// ============================================================================

ast_node!(Literal, LITERAL);
ast_node!(Array, ARRAY);
ast_node!(InlineTable, INLINE_TABLE);

/// Any value on the right of `=`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Literal(Literal),
    Array(Array),
    InlineTable(InlineTable),
}

impl AstNode for Value {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::LITERAL | SyntaxKind::ARRAY | SyntaxKind::INLINE_TABLE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            SyntaxKind::ARRAY => Some(Self::Array(Array(node))),
            SyntaxKind::INLINE_TABLE => Some(Self::InlineTable(InlineTable(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Literal(n) => n.syntax(),
            Self::Array(n) => n.syntax(),
            Self::InlineTable(n) => n.syntax(),
        }
    }
}

impl Value {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

/// Classification of a literal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    BasicString,
    LiteralString,
    MultilineBasicString,
    MultilineLiteralString,
    /// A string whose closing quote is missing
    UnterminatedString,
    Boolean,
    Integer,
    Float,
    DateTime,
    /// A bare word that is none of the above
    Invalid,
}

impl LiteralKind {
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Self::BasicString
                | Self::LiteralString
                | Self::MultilineBasicString
                | Self::MultilineLiteralString
                | Self::UnterminatedString
        )
    }
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        let Some(first) = self.0.first_token() else {
            return LiteralKind::Invalid;
        };
        match first.kind() {
            SyntaxKind::BASIC_STRING => LiteralKind::BasicString,
            SyntaxKind::LITERAL_STRING => LiteralKind::LiteralString,
            SyntaxKind::ML_BASIC_STRING => LiteralKind::MultilineBasicString,
            SyntaxKind::ML_LITERAL_STRING => LiteralKind::MultilineLiteralString,
            SyntaxKind::UNTERMINATED_STRING => LiteralKind::UnterminatedString,
            _ => classify_bare(&self.0.text().to_string()),
        }
    }

    /// The string content for string literals, `None` otherwise
    pub fn string_value(&self) -> Option<String> {
        let token = self.0.first_token()?;
        token
            .kind()
            .is_string()
            .then(|| unquote(token.kind(), token.text()))
    }

    /// Raw source text of the literal
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}

impl Array {
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.0.children().filter_map(Value::cast)
    }
}

impl InlineTable {
    pub fn entries(&self) -> impl Iterator<Item = KeyValue> + '_ {
        self.0.children().filter_map(KeyValue::cast)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn trailing_comment(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut next = node.next_sibling_or_token();
    while let Some(element) = next {
        match element.kind() {
            SyntaxKind::WHITESPACE => next = element.next_sibling_or_token(),
            SyntaxKind::COMMENT => return element.into_token(),
            _ => return None,
        }
    }
    None
}

/// Collect the run of own-line comments directly above `node`.
///
/// A blank line ends the run, as does a comment that trails other content.
fn leading_comments(node: &SyntaxNode) -> Vec<String> {
    let mut comments = Vec::new();
    let mut newlines = 0;
    let mut prev = node.prev_sibling_or_token();
    while let Some(element) = prev {
        match element.kind() {
            SyntaxKind::WHITESPACE => {}
            SyntaxKind::NEWLINE => {
                newlines += 1;
                if newlines > 1 {
                    break;
                }
            }
            SyntaxKind::COMMENT => {
                let own_line = {
                    let mut before = element.prev_sibling_or_token();
                    while before
                        .as_ref()
                        .is_some_and(|e| e.kind() == SyntaxKind::WHITESPACE)
                    {
                        before = before.and_then(|e| e.prev_sibling_or_token());
                    }
                    before.is_none_or(|e| e.kind() == SyntaxKind::NEWLINE)
                };
                if !own_line {
                    break;
                }
                if let Some(token) = element.as_token() {
                    comments.push(comment_text(token.text()));
                }
                newlines = 0;
            }
            _ => break,
        }
        prev = element.prev_sibling_or_token();
    }
    comments.reverse();
    comments
}

fn comment_text(raw: &str) -> String {
    raw.trim_start_matches('#').trim().to_string()
}

/// Strip the quotes of a string token and resolve basic-string escapes
pub(crate) fn unquote(kind: SyntaxKind, text: &str) -> String {
    match kind {
        SyntaxKind::BASIC_STRING => unescape(strip(text, "\"", "\"")),
        SyntaxKind::LITERAL_STRING => strip(text, "'", "'").to_string(),
        SyntaxKind::ML_BASIC_STRING => {
            unescape(strip(text, "\"\"\"", "\"\"\"").trim_start_matches(['\r', '\n']))
        }
        SyntaxKind::ML_LITERAL_STRING => strip(text, "'''", "'''")
            .trim_start_matches(['\r', '\n'])
            .to_string(),
        SyntaxKind::UNTERMINATED_STRING => {
            let body = &text[1.min(text.len())..];
            if text.starts_with('"') {
                unescape(body)
            } else {
                body.to_string()
            }
        }
        _ => text.to_string(),
    }
}

fn strip<'t>(text: &'t str, open: &str, close: &str) -> &'t str {
    let inner = text.strip_prefix(open).unwrap_or(text);
    inner.strip_suffix(close).unwrap_or(inner)
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn classify_bare(text: &str) -> LiteralKind {
    if text == "true" || text == "false" {
        return LiteralKind::Boolean;
    }
    let unsigned = text.trim_start_matches(['+', '-']);
    if matches!(unsigned, "inf" | "nan") {
        return LiteralKind::Float;
    }
    if is_date_like(text) {
        return LiteralKind::DateTime;
    }
    if !unsigned.starts_with(|c: char| c.is_ascii_digit()) {
        return LiteralKind::Invalid;
    }
    if let Some(rest) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0o"))
        .or_else(|| unsigned.strip_prefix("0b"))
    {
        return if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit() || c == '_') {
            LiteralKind::Integer
        } else {
            LiteralKind::Invalid
        };
    }
    if unsigned.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return LiteralKind::Integer;
    }
    let float_chars = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '_' | '.' | 'e' | 'E' | '+' | '-'));
    if float_chars && unsigned.contains(['.', 'e', 'E']) {
        LiteralKind::Float
    } else {
        LiteralKind::Invalid
    }
}

/// `1979-05-27`, `07:32:00` and their combinations
fn is_date_like(text: &str) -> bool {
    let bytes = text.as_bytes();
    let full_date = bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[7] == b'-';
    let local_time = bytes.len() >= 8
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2] == b':'
        && bytes[5] == b':';
    full_date || local_time
}
