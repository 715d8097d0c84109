//! Completion items and the mods.toml completion entry point.

use std::sync::Arc;

use crate::parser::{TextSize, TomlFile};
use crate::schema::{ModsTomlFlavor, SchemaEntry};

use super::providers::ModsTomlCompletion;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    /// A key inside a section
    Key,
    /// A table name inside a header
    Table,
    /// A known value for a key
    Value,
    /// `true` or `false`
    Boolean,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Key => 10,     // Property
            CompletionKind::Table => 9,    // Module
            CompletionKind::Value => 12,   // Value
            CompletionKind::Boolean => 14, // Keyword
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text shown in the list.
    pub label: Arc<str>,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Detail text (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
    /// Text to insert (if different from label).
    pub insert_text: Option<Arc<str>>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Create a new completion item.
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_priority: 100,
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the documentation.
    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    /// Set the insert text.
    pub fn with_insert_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.insert_text = Some(text.into());
        self
    }

    /// Set the sort priority.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }

    /// Create from a schema entry.
    pub fn from_entry(entry: &SchemaEntry, kind: CompletionKind) -> Self {
        let mut item = Self::new(entry.key.as_str(), kind);
        if let Some(value_type) = entry.value_type {
            item.detail = Some(Arc::from(value_type.presentable_name()));
        }
        if !entry.description.is_empty() {
            item.documentation = Some(Arc::from(entry.description.as_str()));
        }
        item
    }

    /// The text an editor inserts when this item is accepted.
    pub fn text_to_insert(&self) -> &str {
        self.insert_text.as_deref().unwrap_or(&self.label)
    }
}

/// Get completion suggestions at an offset in a mods.toml document.
///
/// Uses the default provider set for `flavor`. Returns an empty list when the
/// cursor is not in a completable position.
pub fn completions(file: &TomlFile, flavor: ModsTomlFlavor, offset: TextSize) -> Vec<CompletionItem> {
    ModsTomlCompletion::for_flavor(flavor).completions(file, offset)
}
