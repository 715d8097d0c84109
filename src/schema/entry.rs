//! Schema entry and table types.

use smol_str::SmolStr;

use crate::parser::{LiteralKind, Value};

/// The declared type of a schema entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchemaValueType {
    String,
    Boolean,
    Integer,
    Float,
    DateTime,
    Array,
    Table,
}

impl SchemaValueType {
    /// Name shown next to completion items and in hovers.
    pub fn presentable_name(self) -> &'static str {
        match self {
            SchemaValueType::String => "String",
            SchemaValueType::Boolean => "Boolean",
            SchemaValueType::Integer => "Integer",
            SchemaValueType::Float => "Float",
            SchemaValueType::DateTime => "Date-Time",
            SchemaValueType::Array => "Array",
            SchemaValueType::Table => "Table",
        }
    }

    /// Infer the type of a parsed value, `None` for unclassifiable literals.
    pub fn of_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) => Some(SchemaValueType::Array),
            Value::InlineTable(_) => Some(SchemaValueType::Table),
            Value::Literal(lit) => match lit.kind() {
                kind if kind.is_string() => Some(SchemaValueType::String),
                LiteralKind::Boolean => Some(SchemaValueType::Boolean),
                LiteralKind::Integer => Some(SchemaValueType::Integer),
                LiteralKind::Float => Some(SchemaValueType::Float),
                LiteralKind::DateTime => Some(SchemaValueType::DateTime),
                _ => None,
            },
        }
    }

    /// Whether a value of type `found` satisfies this declared type.
    pub fn accepts(self, found: SchemaValueType) -> bool {
        self == found || (self == SchemaValueType::Float && found == SchemaValueType::Integer)
    }
}

/// A key that is valid at some table path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SchemaEntry {
    /// Key name as written in documents.
    pub key: SmolStr,
    /// Declared value type, if known.
    pub value_type: Option<SchemaValueType>,
    /// Owning table name, `None` for document-root keys and table names.
    pub table: Option<SmolStr>,
    /// Documentation lines joined with newlines.
    pub description: String,
    /// Whether a document must define this key.
    pub required: bool,
}

impl SchemaEntry {
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self {
            key: key.into(),
            value_type: None,
            table: None,
            description: String::new(),
            required: false,
        }
    }

    pub fn with_type(mut self, value_type: SchemaValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn with_table(mut self, table: impl Into<SmolStr>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// A `[table]` or `[[array.table]]` known to the schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaTable {
    /// First header segment (`dependencies` for `[[dependencies.examplemod]]`).
    pub name: SmolStr,
    pub is_array: bool,
    /// Whether the header carries a per-mod sub-key.
    pub keyed: bool,
    pub description: String,
    pub required: bool,
    pub entries: Vec<SchemaEntry>,
}

impl SchemaTable {
    /// Tables without entries accept arbitrary keys.
    pub fn is_free_form(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, key: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// The entry offered when completing a table header.
    pub fn header_entry(&self) -> SchemaEntry {
        let value_type = if self.is_array {
            SchemaValueType::Array
        } else {
            SchemaValueType::Table
        };
        SchemaEntry::new(self.name.clone())
            .with_type(value_type)
            .with_description(self.description.clone())
            .required(self.required)
    }
}
