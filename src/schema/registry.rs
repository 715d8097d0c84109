//! Schema registry: table path → valid entries.
//!
//! A registry is built once from an annotated example document and is
//! read-only afterwards, so it can be shared across threads without locks.
//! Every lookup is total: unknown tables yield empty slices.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::entry::{SchemaEntry, SchemaTable, SchemaValueType};
use super::error::SchemaError;
use crate::base::LineIndex;
use crate::parser::{AstNode, KeyValue, TableLike, parse};

/// Trailing comment marker for required keys and tables.
const MANDATORY_MARKER: &str = "#mandatory";

/// Keys and tables valid in one kind of document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaRegistry {
    root: Vec<SchemaEntry>,
    tables: IndexMap<SmolStr, SchemaTable>,
    array_headers: Vec<SchemaEntry>,
    table_headers: Vec<SchemaEntry>,
}

impl SchemaRegistry {
    /// Build a registry from its parts.
    pub fn new(root: Vec<SchemaEntry>, tables: impl IntoIterator<Item = SchemaTable>) -> Self {
        let tables: IndexMap<SmolStr, SchemaTable> =
            tables.into_iter().map(|t| (t.name.clone(), t)).collect();
        let (array_headers, table_headers) = tables
            .values()
            .map(|t| (t.is_array, t.header_entry()))
            .partition::<Vec<_>, _>(|(is_array, _)| *is_array);
        Self {
            root,
            tables,
            array_headers: array_headers.into_iter().map(|(_, e)| e).collect(),
            table_headers: table_headers.into_iter().map(|(_, e)| e).collect(),
        }
    }

    /// Build a registry from an annotated example document.
    ///
    /// Comment lines directly above a key become its description, a trailing
    /// `#mandatory` comment marks it required, and the example value gives
    /// its type. Headers define tables by their first segment.
    pub fn from_example(text: &str) -> Result<Self, SchemaError> {
        let parsed = parse(text);
        if let Some(error) = parsed.errors.first() {
            let pos = LineIndex::new(text).line_col(error.range.start());
            return Err(SchemaError::Syntax {
                message: error.message.clone(),
                line: pos.line + 1,
                column: pos.col + 1,
            });
        }

        let file = parsed.tree();
        let root = collect_entries(None, file.entries())?;

        let mut tables = Vec::new();
        let mut seen = FxHashSet::default();
        for table in file.tables() {
            let table = schema_table(&table, text)?;
            if !seen.insert(table.name.clone()) {
                return Err(SchemaError::DuplicateTable { name: table.name });
            }
            tables.push(table);
        }

        let registry = Self::new(root, tables);
        tracing::debug!(
            root = registry.root.len(),
            tables = registry.tables.len(),
            "loaded schema"
        );
        Ok(registry)
    }

    /// Keys valid at the document root.
    pub fn root_entries(&self) -> &[SchemaEntry] {
        &self.root
    }

    /// Table names valid in `[[...]]` headers (`is_array_table`) or `[...]` headers.
    pub fn top_level_entries(&self, is_array_table: bool) -> &[SchemaEntry] {
        if is_array_table {
            &self.array_headers
        } else {
            &self.table_headers
        }
    }

    /// Keys valid inside the named table; empty for unknown tables.
    pub fn entries_for_table(&self, table_name: &str) -> &[SchemaEntry] {
        self.tables
            .get(table_name)
            .map(|t| t.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn table(&self, name: &str) -> Option<&SchemaTable> {
        self.tables.get(name)
    }

    pub fn tables(&self) -> impl Iterator<Item = &SchemaTable> {
        self.tables.values()
    }

    /// Look up a key in a table, or at the root when `table` is `None`.
    pub fn entry(&self, table: Option<&str>, key: &str) -> Option<&SchemaEntry> {
        let entries = match table {
            Some(name) => self.entries_for_table(name),
            None => self.root_entries(),
        };
        entries.iter().find(|e| e.key == key)
    }

    /// Every entry in the schema, root first.
    pub fn all_entries(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.root
            .iter()
            .chain(self.tables.values().flat_map(|t| t.entries.iter()))
    }
}

fn schema_table(table: &TableLike, text: &str) -> Result<SchemaTable, SchemaError> {
    let header = table.header();
    let key = header.as_ref().and_then(|h| h.key());
    let Some(name) = key.as_ref().and_then(|k| k.first_segment()).map(|s| s.name()) else {
        let line = LineIndex::new(text).line_col(table.text_range().start()).line + 1;
        return Err(SchemaError::MissingHeaderKey { line });
    };
    let keyed = key.as_ref().is_some_and(|k| k.segments().count() > 1);
    let required = header
        .as_ref()
        .and_then(|h| h.trailing_comment())
        .is_some_and(|c| c.text().contains(MANDATORY_MARKER));

    Ok(SchemaTable {
        entries: collect_entries(Some(&name), table.entries())?,
        name,
        is_array: table.is_array(),
        keyed,
        description: table.doc_comments().join("\n"),
        required,
    })
}

fn collect_entries(
    table: Option<&SmolStr>,
    entries: impl Iterator<Item = KeyValue>,
) -> Result<Vec<SchemaEntry>, SchemaError> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for kv in entries {
        let Some(key) = kv.key_text() else { continue };
        if !seen.insert(key.clone()) {
            return Err(SchemaError::duplicate_entry(table.map(|t| t.as_str()), key));
        }
        let mut entry = SchemaEntry::new(key)
            .with_description(kv.doc_comments().join("\n"))
            .required(
                kv.trailing_comment()
                    .is_some_and(|c| c.text().contains(MANDATORY_MARKER)),
            );
        entry.value_type = kv.value().as_ref().and_then(SchemaValueType::of_value);
        entry.table = table.cloned();
        out.push(entry);
    }
    Ok(out)
}
