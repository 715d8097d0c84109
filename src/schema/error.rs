//! Error types for schema loading.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors that can occur while building a schema from an annotated example.
///
/// Line and column numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The example document does not parse.
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        message: String,
        line: u32,
        column: u32,
    },

    /// A `[]` header with no table name.
    #[error("Table header without a name at line {line}")]
    MissingHeaderKey { line: u32 },

    /// The same table name appears in two headers.
    #[error("Table '{name}' is declared more than once")]
    DuplicateTable { name: SmolStr },

    /// The same key appears twice in one table (`<root>` for the document root).
    #[error("Key '{key}' is declared more than once in {table}")]
    DuplicateEntry { table: SmolStr, key: SmolStr },
}

impl SchemaError {
    /// Create a duplicate entry error.
    pub fn duplicate_entry(table: Option<&str>, key: impl Into<SmolStr>) -> Self {
        Self::DuplicateEntry {
            table: SmolStr::new(table.unwrap_or("<root>")),
            key: key.into(),
        }
    }
}
