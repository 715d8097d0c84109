//! Hover information for mods.toml keys and table names.

use std::fmt::Write;

use crate::parser::{
    AstNode, Key, KeySegment, KeyValue, SyntaxKind, TableLike, TextRange, TextSize, TomlFile,
};
use crate::schema::{SchemaEntry, SchemaRegistry, SchemaTable};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The hovered key segment.
    pub range: TextRange,
}

/// Describe the schema entry under the cursor.
///
/// Works on the first segment of header keys and key/value keys, the same
/// positions completion recognizes. Keys the schema does not know and keys
/// inside inline tables produce no hover.
pub fn hover(file: &TomlFile, schema: &SchemaRegistry, offset: TextSize) -> Option<HoverResult> {
    let root = file.syntax();
    let offset = offset.min(root.text_range().end());
    let segment = root
        .token_at_offset(offset)
        .find_map(|t| t.parent().and_then(KeySegment::cast))?;
    let key = segment.syntax().parent().and_then(Key::cast)?;
    if key.first_segment().as_ref() != Some(&segment) {
        return None;
    }

    let parent = key.syntax().parent()?;
    let contents = match parent.kind() {
        SyntaxKind::TABLE_HEADER => render_table(schema.table(&segment.name())?),
        SyntaxKind::KEY_VALUE => {
            let key_value = KeyValue::cast(parent)?;
            let section = key_value.syntax().parent()?;
            let key_text = key.text();
            let entry = match section.kind() {
                SyntaxKind::TOML_FILE => schema.entry(None, &key_text),
                SyntaxKind::TABLE | SyntaxKind::ARRAY_TABLE => {
                    let name = TableLike::cast(section)?.name()?;
                    schema.entry(Some(&name), &key_text)
                }
                _ => None,
            }?;
            render_entry(entry)
        }
        _ => return None,
    };

    Some(HoverResult {
        contents,
        range: segment.text_range(),
    })
}

fn render_entry(entry: &SchemaEntry) -> String {
    let mut out = format!("**{}**", entry.key);
    if let Some(value_type) = entry.value_type {
        let _ = write!(out, ": {}", value_type.presentable_name());
    }
    if entry.required {
        out.push_str(" *(required)*");
    }
    if !entry.description.is_empty() {
        out.push_str("\n\n");
        out.push_str(&entry.description);
    }
    out
}

fn render_table(table: &SchemaTable) -> String {
    let (open, close) = if table.is_array { ("[[", "]]") } else { ("[", "]") };
    let mut out = format!("**{}{}{}**", open, table.name, close);
    if table.required {
        out.push_str(" *(required)*");
    }
    if !table.description.is_empty() {
        out.push_str("\n\n");
        out.push_str(&table.description);
    }
    out
}
