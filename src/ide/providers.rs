//! Completion providers for mods.toml.
//!
//! A [`ModsTomlCompletion`] holds an ordered list of providers. Each request
//! resolves one [`CompletionContext`] and hands it to every provider in
//! registration order; the first item with a given label wins.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::completion::{CompletionItem, CompletionKind};
use super::context::{CompletionContext, CompletionPosition, KeyOwner, ValueSlot};
use crate::parser::{AstNode, SyntaxKind, TableHeader, TextSize, TomlFile};
use crate::schema::{ModsTomlFlavor, SchemaRegistry, SchemaValueType};

/// Contributes completion items for a resolved context.
pub trait CompletionProvider: Send + Sync {
    fn add_completions(
        &self,
        context: &CompletionContext,
        schema: &SchemaRegistry,
        result: &mut Vec<CompletionItem>,
    );

    /// The key whose value slot this provider is bound to, if any.
    fn value_key(&self) -> Option<&str> {
        None
    }
}

/// Header names and keys from the schema.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyCompletionProvider;

impl CompletionProvider for KeyCompletionProvider {
    fn add_completions(
        &self,
        context: &CompletionContext,
        schema: &SchemaRegistry,
        result: &mut Vec<CompletionItem>,
    ) {
        match &context.position {
            CompletionPosition::HeaderKey {
                is_array,
                header,
                declared,
                ..
            } => {
                let closer = missing_closer(header, *is_array);
                for entry in schema.top_level_entries(*is_array) {
                    if declared.contains(&entry.key) {
                        continue;
                    }
                    let mut item = CompletionItem::from_entry(entry, CompletionKind::Table);
                    if !closer.is_empty() {
                        item = item.with_insert_text(format!("{}{}", entry.key, closer));
                    }
                    result.push(item);
                }
            }
            CompletionPosition::Key {
                owner,
                existing,
                key_value,
                ..
            } => {
                let entries = match owner {
                    KeyOwner::Root => schema.root_entries(),
                    KeyOwner::Table { name, .. } => schema.entries_for_table(name),
                };
                let needs_eq = key_value.as_ref().is_none_or(|kv| kv.eq_token().is_none());
                for entry in entries.iter().filter(|e| !existing.contains(&e.key)) {
                    let mut item = CompletionItem::from_entry(entry, CompletionKind::Key);
                    if needs_eq {
                        item = item.with_insert_text(format!("{} = ", entry.key));
                    }
                    result.push(item);
                }
            }
            CompletionPosition::Value { .. } => {}
        }
    }
}

/// A fixed list of values for one key.
#[derive(Clone, Debug)]
pub struct KnownValuesCompletionProvider {
    key: SmolStr,
    values: Vec<SmolStr>,
}

impl KnownValuesCompletionProvider {
    pub fn new(key: impl Into<SmolStr>, values: impl IntoIterator<Item = impl Into<SmolStr>>) -> Self {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl CompletionProvider for KnownValuesCompletionProvider {
    fn add_completions(
        &self,
        context: &CompletionContext,
        _schema: &SchemaRegistry,
        result: &mut Vec<CompletionItem>,
    ) {
        let CompletionPosition::Value { key, slot, .. } = &context.position else {
            return;
        };
        if key != self.key.as_str() {
            return;
        }
        for value in &self.values {
            let mut item = CompletionItem::new(value.as_str(), CompletionKind::Value)
                .with_detail(self.key.as_str());
            if *slot == ValueSlot::Empty {
                item = item.with_insert_text(format!("\"{}\"", value));
            }
            result.push(item);
        }
    }

    fn value_key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

/// `true` and `false` for a boolean key.
#[derive(Clone, Debug)]
pub struct BooleanCompletionProvider {
    key: SmolStr,
}

impl BooleanCompletionProvider {
    pub fn new(key: impl Into<SmolStr>) -> Self {
        Self { key: key.into() }
    }
}

impl CompletionProvider for BooleanCompletionProvider {
    fn add_completions(
        &self,
        context: &CompletionContext,
        _schema: &SchemaRegistry,
        result: &mut Vec<CompletionItem>,
    ) {
        let CompletionPosition::Value { key, .. } = &context.position else {
            return;
        };
        if key != self.key.as_str() {
            return;
        }
        for value in ["true", "false"] {
            result.push(CompletionItem::new(value, CompletionKind::Boolean).with_detail("Boolean"));
        }
    }

    fn value_key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

/// Completion for one mods.toml schema.
pub struct ModsTomlCompletion<'s> {
    schema: &'s SchemaRegistry,
    providers: Vec<Box<dyn CompletionProvider>>,
    boolean_keys: FxHashSet<SmolStr>,
}

impl<'s> ModsTomlCompletion<'s> {
    /// A registry with no providers.
    pub fn new(schema: &'s SchemaRegistry) -> Self {
        Self {
            schema,
            providers: Vec::new(),
            boolean_keys: FxHashSet::default(),
        }
    }

    /// The default providers for a mods.toml flavor: schema keys, the
    /// flavor's known values, and booleans for every boolean-typed key.
    pub fn for_flavor(flavor: ModsTomlFlavor) -> ModsTomlCompletion<'static> {
        let schema = flavor.schema();
        let mut completion = ModsTomlCompletion::new(schema).with_provider(KeyCompletionProvider);
        for known in flavor.known_values() {
            completion = completion.extend_known_values(known.key, known.values.iter().copied());
        }
        let boolean_keys: Vec<SmolStr> = schema
            .all_entries()
            .filter(|e| e.value_type == Some(SchemaValueType::Boolean))
            .map(|e| e.key.clone())
            .collect();
        for key in boolean_keys {
            completion = completion.extend_boolean_values(key);
        }
        completion
    }

    /// Append a provider; it runs after the ones already registered.
    pub fn with_provider(mut self, provider: impl CompletionProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Offer `values` for `key`. Ignored when `key` is already boolean.
    pub fn extend_known_values(
        self,
        key: impl Into<SmolStr>,
        values: impl IntoIterator<Item = impl Into<SmolStr>>,
    ) -> Self {
        let key = key.into();
        if self.boolean_keys.contains(&key) {
            tracing::debug!(key = %key, "ignoring known values for boolean key");
            return self;
        }
        self.with_provider(KnownValuesCompletionProvider::new(key, values))
    }

    /// Offer `true`/`false` for `key`, replacing any values registered for it.
    pub fn extend_boolean_values(mut self, key: impl Into<SmolStr>) -> Self {
        let key = key.into();
        self.providers
            .retain(|p| p.value_key() != Some(key.as_str()));
        self.boolean_keys.insert(key.clone());
        self.with_provider(BooleanCompletionProvider::new(key))
    }

    pub fn schema(&self) -> &'s SchemaRegistry {
        self.schema
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Completion items at `offset`, in provider order.
    pub fn completions(&self, file: &TomlFile, offset: TextSize) -> Vec<CompletionItem> {
        let Some(context) = CompletionContext::resolve(file, offset) else {
            return Vec::new();
        };

        let mut items = Vec::new();
        for provider in &self.providers {
            provider.add_completions(&context, self.schema, &mut items);
        }

        let mut seen = FxHashSet::default();
        items.retain(|item| seen.insert(item.label.clone()));
        for (index, item) in items.iter_mut().enumerate() {
            item.sort_priority = index as u32;
        }
        tracing::trace!(count = items.len(), "completion items");
        items
    }
}

/// Closing brackets the header still needs
fn missing_closer(header: &TableHeader, is_array: bool) -> String {
    let needed = if is_array { 2 } else { 1 };
    let present = header
        .syntax()
        .children_with_tokens()
        .filter(|t| t.kind() == SyntaxKind::R_BRACKET)
        .count();
    "]".repeat(needed - present.min(needed))
}
