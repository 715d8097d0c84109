//! Schema checks for mods.toml documents.
//!
//! Walks the tree once, comparing every section and pair with the flavor's
//! schema. Syntax errors are not reported here; see
//! [`Diagnostic::from_syntax_error`].

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::config::AnalysisConfig;
use crate::parser::{AstNode, KeyValue, TableLike, TextRange, TextSize, TomlFile, Value};
use crate::schema::{ModsTomlFlavor, SchemaEntry, SchemaRegistry, SchemaValueType};

const MODS_TABLE: &str = "mods";
const DEPENDENCIES_TABLE: &str = "dependencies";
const MOD_ID_KEY: &str = "modId";

/// Check a mods.toml document against the bundled schema for `flavor`.
pub fn check_mods_toml(
    file: &TomlFile,
    flavor: ModsTomlFlavor,
    config: &AnalysisConfig,
) -> Vec<Diagnostic> {
    let mut checker = ModsTomlChecker::new(flavor, config);
    checker.check_file(file);
    checker.finish()
}

/// Whether `id` matches `^[a-z][a-z0-9_]{1,63}$`.
pub fn is_valid_mod_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && (2..=64).contains(&id.len())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Runs the schema checks over one document.
pub struct ModsTomlChecker<'a> {
    flavor: ModsTomlFlavor,
    schema: &'static SchemaRegistry,
    config: &'a AnalysisConfig,
    collector: DiagnosticCollector,
    /// Mod ids declared in `[[mods]]`
    mod_ids: FxHashSet<String>,
    /// Second header segments of `[[dependencies.<id>]]`
    dependents: Vec<(SmolStr, TextRange)>,
}

impl<'a> ModsTomlChecker<'a> {
    pub fn new(flavor: ModsTomlFlavor, config: &'a AnalysisConfig) -> Self {
        Self {
            flavor,
            schema: flavor.schema(),
            config,
            collector: DiagnosticCollector::new(),
            mod_ids: FxHashSet::default(),
            dependents: Vec::new(),
        }
    }

    pub fn check_file(&mut self, file: &TomlFile) {
        let document_start = TextRange::empty(TextSize::new(0));
        self.check_section(None, file.entries(), document_start);

        let mut present = FxHashSet::default();
        let mut declared: FxHashMap<String, TextRange> = FxHashMap::default();
        for table in file.tables() {
            if let Some(name) = table.name() {
                present.insert(name.clone());
                self.check_table(&table, name, &mut declared);
            }
        }

        let schema = self.schema;
        for table in schema.tables() {
            if table.required && !present.contains(&table.name) {
                let header = if table.is_array {
                    format!("table '[[{}]]'", table.name)
                } else {
                    format!("table '[{}]'", table.name)
                };
                self.collector.missing_mandatory(&header, document_start);
            }
        }

        self.check_dependents();
    }

    fn check_table(
        &mut self,
        table: &TableLike,
        name: SmolStr,
        declared: &mut FxHashMap<String, TextRange>,
    ) {
        let Some(key) = table.header().and_then(|h| h.key()) else {
            return;
        };
        let key_range = key.text_range();

        let schema = self.schema;
        let Some(schema_table) = schema.table(&name) else {
            if self.config.report_unknown_keys {
                self.collector.add(
                    Diagnostic::warning(key_range, format!("unknown table '{}'", name))
                        .with_code(codes::UNKNOWN_KEY),
                );
            }
            return;
        };

        if schema_table.is_array != table.is_array() {
            let expected = if schema_table.is_array {
                format!("[[{}]]", key.text())
            } else {
                format!("[{}]", key.text())
            };
            self.collector.add(
                Diagnostic::error(key_range, format!("'{}' must be declared as '{}'", name, expected))
                    .with_code(codes::WRONG_TABLE_FORM),
            );
            return;
        }

        if !table.is_array() {
            let text = key.text();
            if let Some(previous) = declared.get(&text) {
                self.collector.duplicate_table(&text, key_range, *previous);
            } else {
                declared.insert(text, key_range);
            }
        }

        if schema_table.keyed && name == DEPENDENCIES_TABLE {
            if let Some(dependent) = key.segments().nth(1) {
                self.dependents.push((dependent.name(), dependent.text_range()));
            }
        }

        if schema_table.is_free_form() {
            return;
        }
        self.check_section(Some(&name), table.entries(), key_range);

        if name == MODS_TABLE {
            for key_value in table.entries() {
                self.check_mod_id(&key_value);
            }
        }
    }

    /// Pairs of one section: duplicates, unknown keys, values, mandatory keys.
    fn check_section(
        &mut self,
        table: Option<&SmolStr>,
        entries: impl Iterator<Item = KeyValue>,
        anchor: TextRange,
    ) {
        let schema = self.schema;
        let table = table.map(SmolStr::as_str);
        let mut seen: FxHashMap<String, TextRange> = FxHashMap::default();

        for key_value in entries {
            let (Some(key), Some(key_text)) = (key_value.key(), key_value.key_text()) else {
                continue;
            };
            let key_range = key.text_range();
            if let Some(previous) = seen.get(&key_text) {
                self.collector.duplicate_key(&key_text, key_range, *previous);
                continue;
            }
            seen.insert(key_text.clone(), key_range);

            let Some(entry) = schema.entry(table, &key_text) else {
                if self.config.report_unknown_keys {
                    self.collector.unknown_key(&key_text, table, key_range);
                }
                continue;
            };
            if let Some(value) = key_value.value() {
                self.check_value(entry, &value);
            }
        }

        let entries = match table {
            Some(name) => schema.entries_for_table(name),
            None => schema.root_entries(),
        };
        for entry in entries {
            if entry.required && !seen.contains_key(entry.key.as_str()) {
                let what = match table {
                    Some(name) => format!("key '{}' in '{}'", entry.key, name),
                    None => format!("key '{}'", entry.key),
                };
                self.collector.missing_mandatory(&what, anchor);
            }
        }
    }

    fn check_value(&mut self, entry: &SchemaEntry, value: &Value) {
        let range = value.text_range();
        if let (Some(expected), Some(found)) = (entry.value_type, SchemaValueType::of_value(value)) {
            if !expected.accepts(found) {
                self.collector
                    .type_mismatch(range, expected.presentable_name(), found.presentable_name());
                return;
            }
        }

        let Some(known) = self
            .flavor
            .known_values_for(&entry.key)
            .filter(|k| k.exhaustive)
        else {
            return;
        };
        let Some(text) = value.as_literal().and_then(|l| l.string_value()) else {
            return;
        };
        if !known.values.contains(&text.as_str()) {
            self.collector.add(
                Diagnostic::warning(
                    range,
                    format!(
                        "'{}' is not a valid value for '{}', expected one of: {}",
                        text,
                        entry.key,
                        known.values.join(", ")
                    ),
                )
                .with_code(codes::UNKNOWN_VALUE),
            );
        }
    }

    fn check_mod_id(&mut self, key_value: &KeyValue) {
        if key_value.key_text().as_deref() != Some(MOD_ID_KEY) {
            return;
        }
        let Some(value) = key_value.value() else {
            return;
        };
        let Some(id) = value.as_literal().and_then(|l| l.string_value()) else {
            return;
        };
        if !is_valid_mod_id(&id) {
            self.collector.add(
                Diagnostic::warning(
                    value.text_range(),
                    format!(
                        "invalid mod id '{}': must match ^[a-z][a-z0-9_]{{1,63}}$",
                        id
                    ),
                )
                .with_code(codes::INVALID_MOD_ID),
            );
        }
        self.mod_ids.insert(id);
    }

    /// Without any declared mod the missing `[[mods]]` is reported instead.
    fn check_dependents(&mut self) {
        if self.mod_ids.is_empty() {
            return;
        }
        for (id, range) in std::mem::take(&mut self.dependents) {
            if !self.mod_ids.contains(id.as_str()) {
                self.collector.add(
                    Diagnostic::warning(
                        range,
                        format!("dependencies declared for undeclared mod '{}'", id),
                    )
                    .with_code(codes::UNDECLARED_DEPENDENT),
                );
            }
        }
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        tracing::debug!(
            flavor = ?self.flavor,
            errors = self.collector.error_count(),
            warnings = self.collector.warning_count(),
            "checked mods file"
        );
        self.collector.finish()
    }
}
