//! Cursor context resolution for completion.
//!
//! Turns a byte offset into one of three positions: the first segment of a
//! table header key, the first segment of a key/value key, or a value slot
//! that passed the eligibility guard. Anything else resolves to `None`.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::parser::{
    AstNode, Key, KeySegment, KeyValue, LiteralKind, SyntaxKind, SyntaxToken, TableHeader,
    TableLike, TextSize, TomlFile, Value,
};

/// The section that owns a key/value pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOwner {
    Root,
    Table { name: SmolStr, is_array: bool },
}

/// How the cursor sits in a value slot that passed the eligibility guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueSlot {
    /// `key = <caret>`
    Empty,
    /// `key = "va<caret>"`, closed or not
    InString,
}

/// What is being completed.
#[derive(Clone, Debug)]
pub enum CompletionPosition {
    /// First segment of a `[...]` or `[[...]]` header key
    HeaderKey {
        is_array: bool,
        header: TableHeader,
        segment: Option<KeySegment>,
        /// Full key text of the other `[...]` headers in the document.
        ///
        /// Candidates are excluded only on an identical header: `[modproperties]`
        /// hides `modproperties`, while a keyed `[modproperties.examplemod]`
        /// hides nothing, since one keyed table per mod id is allowed.
        declared: FxHashSet<SmolStr>,
    },
    /// First segment of the key of a key/value pair, or a blank line
    Key {
        owner: KeyOwner,
        /// Keys of the sibling pairs in the owning section
        existing: FxHashSet<SmolStr>,
        key_value: Option<KeyValue>,
        segment: Option<KeySegment>,
    },
    /// The value slot of a key/value pair
    Value {
        key: String,
        key_value: KeyValue,
        slot: ValueSlot,
    },
}

/// A single completion request, discarded afterwards.
#[derive(Clone, Debug)]
pub struct CompletionContext {
    pub offset: TextSize,
    /// Header key segments of the enclosing section, empty at the root
    pub table_path: Vec<SmolStr>,
    pub position: CompletionPosition,
}

impl CompletionContext {
    /// Resolve the completion position at `offset`, if completion applies there.
    pub fn resolve(file: &TomlFile, offset: TextSize) -> Option<Self> {
        let offset = offset.min(file.syntax().text_range().end());
        let position = resolve_position(file, offset)?;
        let table_path = match position {
            CompletionPosition::HeaderKey { .. } => Vec::new(),
            _ => table_path_at(file, offset),
        };
        tracing::trace!(
            offset = u32::from(offset),
            position = position.label(),
            "resolved completion context"
        );
        Some(Self {
            offset,
            table_path,
            position,
        })
    }
}

impl CompletionPosition {
    fn label(&self) -> &'static str {
        match self {
            CompletionPosition::HeaderKey { .. } => "header-key",
            CompletionPosition::Key { .. } => "key",
            CompletionPosition::Value { .. } => "value",
        }
    }
}

/// The eligibility guard for value completion.
///
/// Completion is permitted only when no value follows the `=` yet (an
/// unfinished bare word counts as no value), or when the value is a string
/// literal and the cursor lies inside its quotes (the end of an unterminated
/// string counts as inside). Completing after a
/// finished number, boolean, array, inline table or closed string would
/// corrupt valid content.
pub fn value_slot(key_value: &KeyValue, offset: TextSize) -> Option<ValueSlot> {
    let eq = key_value.eq_token()?;
    if offset < eq.text_range().end() {
        return None;
    }
    match key_value.value() {
        None => Some(ValueSlot::Empty),
        // A half-typed bare word (`side = B`) is not a value yet
        Some(Value::Literal(literal)) if literal.kind() == LiteralKind::Invalid => {
            Some(ValueSlot::Empty)
        }
        Some(Value::Literal(literal)) => {
            let range = literal.text_range();
            let inside = match literal.kind() {
                LiteralKind::UnterminatedString => {
                    range.start() < offset && offset <= range.end()
                }
                kind if kind.is_string() => range.start() < offset && offset < range.end(),
                _ => false,
            };
            inside.then_some(ValueSlot::InString)
        }
        Some(_) => None,
    }
}

fn resolve_position(file: &TomlFile, offset: TextSize) -> Option<CompletionPosition> {
    let root = file.syntax();
    let left = root
        .token_at_offset(offset)
        .left_biased()
        .filter(|t| t.text_range().start() < offset);

    if let Some(segment) = segment_at(file, left.as_ref(), offset) {
        return segment_position(file, segment);
    }

    let Some(left) = left else {
        // Start of the document
        return blank_key_position(file, offset);
    };

    if let Some(key_value) = left.parent_ancestors().find_map(KeyValue::cast) {
        let slot = value_slot(&key_value, offset);
        if slot.is_none() {
            tracing::trace!(offset = u32::from(offset), "value slot rejected by guard");
        }
        let key = key_value.key_text()?;
        return slot.map(|slot| CompletionPosition::Value {
            key,
            key_value,
            slot,
        });
    }

    if left.kind() == SyntaxKind::L_BRACKET {
        if let Some(header) = left.parent().and_then(TableHeader::cast) {
            return Some(header_position(file, header, None));
        }
    }

    if at_line_start(&left) {
        return blank_key_position(file, offset);
    }

    None
}

/// The key segment touching the cursor from the left, or starting right at it
fn segment_at(file: &TomlFile, left: Option<&SyntaxToken>, offset: TextSize) -> Option<KeySegment> {
    let in_segment = |t: &SyntaxToken| t.parent().and_then(KeySegment::cast);
    if let Some(segment) = left.and_then(in_segment) {
        return Some(segment);
    }
    file.syntax()
        .token_at_offset(offset)
        .right_biased()
        .filter(|t| t.text_range().start() == offset)
        .and_then(|t| in_segment(&t))
}

/// Header keys and pair keys are separate branches; neither falls through
/// to the other.
fn segment_position(file: &TomlFile, segment: KeySegment) -> Option<CompletionPosition> {
    let key = segment.syntax().parent().and_then(Key::cast)?;
    let is_first = key.first_segment().as_ref() == Some(&segment);
    let parent = key.syntax().parent()?;

    match parent.kind() {
        SyntaxKind::TABLE_HEADER => {
            if !is_first {
                return None;
            }
            let header = TableHeader::cast(parent)?;
            Some(header_position(file, header, Some(segment)))
        }
        SyntaxKind::KEY_VALUE => {
            if !is_first {
                return None;
            }
            let key_value = KeyValue::cast(parent)?;
            pair_key_position(file, key_value, segment)
        }
        _ => None,
    }
}

/// Array tables and keyed headers never exclude a candidate; see `declared`.
fn header_position(
    file: &TomlFile,
    header: TableHeader,
    segment: Option<KeySegment>,
) -> CompletionPosition {
    let own_table = header.syntax().parent();
    let declared = file
        .tables()
        .filter(|t| !t.is_array() && Some(t.syntax()) != own_table.as_ref())
        .filter_map(|t| t.header()?.key())
        .map(|k| SmolStr::from(k.text()))
        .collect();
    CompletionPosition::HeaderKey {
        is_array: header.is_array(),
        header,
        segment,
        declared,
    }
}

fn pair_key_position(
    file: &TomlFile,
    key_value: KeyValue,
    segment: KeySegment,
) -> Option<CompletionPosition> {
    let parent = key_value.syntax().parent()?;
    let (owner, existing) = match parent.kind() {
        SyntaxKind::TOML_FILE => (
            KeyOwner::Root,
            existing_keys(file.entries(), Some(&key_value)),
        ),
        SyntaxKind::TABLE | SyntaxKind::ARRAY_TABLE => {
            let table = TableLike::cast(parent)?;
            let owner = KeyOwner::Table {
                name: table.name()?,
                is_array: table.is_array(),
            };
            (owner, existing_keys(table.entries(), Some(&key_value)))
        }
        // Inline tables carry no schema
        _ => return None,
    };
    Some(CompletionPosition::Key {
        owner,
        existing,
        key_value: Some(key_value),
        segment: Some(segment),
    })
}

/// A fresh key on an otherwise empty line
fn blank_key_position(file: &TomlFile, offset: TextSize) -> Option<CompletionPosition> {
    let (owner, existing) = match file.table_at(offset) {
        Some(table) => {
            let owner = KeyOwner::Table {
                name: table.name()?,
                is_array: table.is_array(),
            };
            (owner, existing_keys(table.entries(), None))
        }
        None => (KeyOwner::Root, existing_keys(file.entries(), None)),
    };
    Some(CompletionPosition::Key {
        owner,
        existing,
        key_value: None,
        segment: None,
    })
}

fn existing_keys(
    entries: impl Iterator<Item = KeyValue>,
    current: Option<&KeyValue>,
) -> FxHashSet<SmolStr> {
    entries
        .filter(|kv| Some(kv) != current)
        .filter_map(|kv| kv.key_text())
        .map(SmolStr::from)
        .collect()
}

/// Only whitespace between the start of the line and the cursor
fn at_line_start(left: &SyntaxToken) -> bool {
    match left.kind() {
        SyntaxKind::NEWLINE => true,
        SyntaxKind::WHITESPACE => left
            .prev_token()
            .is_none_or(|t| t.kind() == SyntaxKind::NEWLINE),
        _ => false,
    }
}

fn table_path_at(file: &TomlFile, offset: TextSize) -> Vec<SmolStr> {
    file.table_at(offset)
        .and_then(|t| t.header())
        .and_then(|h| h.key())
        .map(|k| k.segments().map(|s| s.name()).collect())
        .unwrap_or_default()
}
