//! Cursor fixtures and completion shortcuts.

use mcdev::TextSize;
use mcdev::ide::{CompletionItem, completions};
use mcdev::parser::parse;
use mcdev::schema::ModsTomlFlavor;

pub const CARET: &str = "<caret>";

/// Split a `<caret>`-marked source into text and cursor offset.
pub fn extract_caret(marked: &str) -> (String, TextSize) {
    let offset = marked
        .find(CARET)
        .unwrap_or_else(|| panic!("no {} marker in {:?}", CARET, marked));
    (marked.replacen(CARET, "", 1), TextSize::new(offset as u32))
}

/// Completion items at the caret of a marked mods.toml source.
pub fn complete(flavor: ModsTomlFlavor, marked: &str) -> Vec<CompletionItem> {
    let (text, offset) = extract_caret(marked);
    let file = parse(&text).tree();
    completions(&file, flavor, offset)
}

/// Completion labels at the caret of a marked Forge mods.toml source.
pub fn labels(marked: &str) -> Vec<String> {
    labels_for(ModsTomlFlavor::Forge, marked)
}

pub fn labels_for(flavor: ModsTomlFlavor, marked: &str) -> Vec<String> {
    complete(flavor, marked)
        .into_iter()
        .map(|item| item.label.to_string())
        .collect()
}

/// Find an item by label, panicking with the full list otherwise.
pub fn item<'a>(items: &'a [CompletionItem], label: &str) -> &'a CompletionItem {
    items
        .iter()
        .find(|i| &*i.label == label)
        .unwrap_or_else(|| {
            let all: Vec<_> = items.iter().map(|i| i.label.as_ref()).collect();
            panic!("no item {:?} in {:?}", label, all)
        })
}
