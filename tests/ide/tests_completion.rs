//! Code completion tests for mods.toml.
//!
//! Sources are written the way they look while typing: half-finished keys,
//! headers without closing brackets, values without closing quotes.

use rstest::rstest;

use crate::helpers::completion_helpers::*;
use mcdev::ide::CompletionKind;
use mcdev::schema::ModsTomlFlavor;

// =============================================================================
// KEYS
// =============================================================================

#[test]
fn test_existing_keys_are_not_suggested_again() {
    let labels = labels("[[mods]]\nmodId=\"examplemod\"\ndisplayName=\"x\"\n<caret>");
    assert!(!labels.contains(&"modId".to_string()), "got {:?}", labels);
    assert!(!labels.contains(&"displayName".to_string()), "got {:?}", labels);
    assert!(labels.contains(&"version".to_string()), "got {:?}", labels);
    assert!(labels.contains(&"logoBlur".to_string()), "got {:?}", labels);
}

#[test]
fn test_existing_root_keys_are_not_suggested_again() {
    let labels = labels("modLoader=\"javafml\"\nlic<caret>\n\n[[mods]]\nlicense=\"x\"\n");
    assert!(!labels.contains(&"modLoader".to_string()));
    assert!(labels.contains(&"license".to_string()));
    assert!(labels.contains(&"loaderVersion".to_string()));
}

#[test]
fn test_key_being_typed_is_still_suggested() {
    let labels = labels("[[mods]]\nmodI<caret>");
    assert!(labels.contains(&"modId".to_string()), "got {:?}", labels);
}

#[test]
fn test_root_keys_in_schema_order() {
    let labels = labels("<caret>");
    assert_eq!(
        labels,
        vec![
            "modLoader",
            "loaderVersion",
            "license",
            "issueTrackerURL",
            "showAsResourcePack",
            "clientSideOnly",
            "services",
        ]
    );
}

#[test]
fn test_keyed_table_keys() {
    let labels = labels("[[dependencies.examplemod]]\nmodId=\"forge\"\n<caret>");
    assert_eq!(labels, vec!["mandatory", "versionRange", "ordering", "side"]);
}

#[test]
fn test_neoforge_keys_differ() {
    let labels = labels_for(
        ModsTomlFlavor::NeoForge,
        "[[dependencies.examplemod]]\n<caret>",
    );
    assert!(labels.contains(&"type".to_string()));
    assert!(labels.contains(&"reason".to_string()));
    assert!(!labels.contains(&"mandatory".to_string()));
}

#[rstest]
#[case::free_form_table("[modproperties.examplemod]\n<caret>")]
#[case::unknown_table("[[plugins]]\n<caret>")]
#[case::second_key_segment("[[mods]]\nmodId.ex<caret>")]
#[case::inline_table("[[dependencies.x]]\ninline = { <caret> }")]
#[case::inside_comment("# modId<caret>")]
fn test_no_key_completion(#[case] marked: &str) {
    assert!(labels(marked).is_empty(), "got {:?}", labels(marked));
}

#[test]
fn test_key_items_carry_schema_docs() {
    let items = complete(ModsTomlFlavor::Forge, "[[mods]]\n<caret>");
    let mod_id = item(&items, "modId");
    assert_eq!(mod_id.kind, CompletionKind::Key);
    assert_eq!(mod_id.detail.as_deref(), Some("String"));
    assert_eq!(mod_id.documentation.as_deref(), Some("The modid of the mod"));
    assert_eq!(mod_id.text_to_insert(), "modId = ");
}

// =============================================================================
// HEADERS
// =============================================================================

#[test]
fn test_array_header_uses_array_tables() {
    assert_eq!(labels("[[<caret>"), vec!["mods", "dependencies"]);
    assert_eq!(labels("[[<caret>]]"), vec!["mods", "dependencies"]);
    assert_eq!(labels("[[de<caret>]]"), vec!["mods", "dependencies"]);
}

#[test]
fn test_plain_header_uses_plain_tables() {
    assert_eq!(labels("[<caret>"), vec!["modproperties"]);
    assert_eq!(labels("[mod<caret>]"), vec!["modproperties"]);
}

#[test]
fn test_neoforge_array_headers() {
    assert_eq!(
        labels_for(ModsTomlFlavor::NeoForge, "[[<caret>"),
        vec!["mods", "mixins", "accessTransformers", "dependencies"]
    );
}

#[test]
fn test_declared_plain_table_is_excluded() {
    assert!(labels("[modproperties]\n\n[<caret>]").is_empty());
    // Only an identical header counts as declared
    assert_eq!(
        labels("[modproperties.examplemod]\n\n[<caret>]"),
        vec!["modproperties"]
    );
}

#[test]
fn test_array_tables_are_never_excluded() {
    assert_eq!(
        labels("[[mods]]\nmodId=\"a\"\n\n[[<caret>]]"),
        vec!["mods", "dependencies"]
    );
}

#[test]
fn test_header_insert_text() {
    let items = complete(ModsTomlFlavor::Forge, "[[<caret>");
    assert_eq!(item(&items, "mods").text_to_insert(), "mods]]");
    assert_eq!(item(&items, "mods").kind, CompletionKind::Table);

    let items = complete(ModsTomlFlavor::Forge, "[[<caret>]]");
    assert_eq!(item(&items, "mods").text_to_insert(), "mods");
}

// =============================================================================
// VALUES
// =============================================================================

#[test]
fn test_mod_loader_values() {
    assert_eq!(labels("modLoader = \"<caret>\""), vec!["javafml"]);
    assert_eq!(labels("modLoader = \"java<caret>"), vec!["javafml"]);
}

#[rstest]
#[case("displayTest", &["MATCH_VERSION", "IGNORE_SERVER_VERSION", "IGNORE_ALL_VERSION", "NONE"])]
#[case("ordering", &["NONE", "BEFORE", "AFTER"])]
#[case("side", &["BOTH", "CLIENT", "SERVER"])]
fn test_known_values(#[case] key: &str, #[case] expected: &[&str]) {
    assert_eq!(labels(&format!("{} = <caret>", key)), expected);
    assert_eq!(labels(&format!("{} = \"<caret>\"", key)), expected);
}

#[test]
fn test_version_substitutions() {
    let labels = labels("[[mods]]\nversion = \"<caret>\"");
    assert!(labels.contains(&"${file.jarVersion}".to_string()), "got {:?}", labels);
}

#[test]
fn test_known_value_quoting() {
    let items = complete(ModsTomlFlavor::Forge, "side = <caret>");
    assert_eq!(item(&items, "BOTH").text_to_insert(), "\"BOTH\"");

    let items = complete(ModsTomlFlavor::Forge, "side = \"<caret>\"");
    assert_eq!(item(&items, "BOTH").text_to_insert(), "BOTH");
}

#[rstest]
#[case::root("showAsResourcePack = <caret>")]
#[case::root_client_only("clientSideOnly = <caret>")]
#[case::mods("[[mods]]\nlogoBlur = <caret>")]
#[case::dependencies("[[dependencies.examplemod]]\nmandatory = <caret>")]
#[case::inside_string("[[mods]]\nlogoBlur = \"<caret>\"")]
#[case::half_typed_word("[[mods]]\nlogoBlur = t<caret>")]
fn test_boolean_values(#[case] marked: &str) {
    assert_eq!(labels(marked), vec!["true", "false"]);
}

#[test]
fn test_neoforge_dependency_type() {
    assert_eq!(
        labels_for(ModsTomlFlavor::NeoForge, "type = \"<caret>\""),
        vec!["required", "optional", "incompatible", "discouraged"]
    );
    assert!(labels("type = \"<caret>\"").is_empty());
}

#[test]
fn test_unknown_key_has_no_values() {
    assert!(labels("credits = \"<caret>\"").is_empty());
}

// =============================================================================
// ELIGIBILITY GUARD
// =============================================================================

#[rstest]
#[case::after_number("modLoader = 5 <caret>")]
#[case::end_of_number("side = 5<caret>")]
#[case::after_boolean("logoBlur = true <caret>")]
#[case::after_closed_string("side = \"BOTH\" <caret>")]
#[case::right_after_closed_string("side = \"BOTH\"<caret>")]
#[case::before_string("side = <caret>\"BOTH\"")]
#[case::after_array("side = [] <caret>")]
#[case::inside_array("side = [\"<caret>\"]")]
#[case::after_inline_table("side = {} <caret>")]
#[case::before_equals("side <caret>= ")]
fn test_guard_rejects(#[case] marked: &str) {
    assert!(labels(marked).is_empty(), "got {:?}", labels(marked));
}

#[rstest]
#[case::empty_value("side = <caret>")]
#[case::empty_value_no_space("side =<caret>")]
#[case::open_string("side = \"<caret>")]
#[case::partial_open_string("side = \"BO<caret>")]
#[case::inside_closed_string("side = \"B<caret>OTH\"")]
#[case::literal_string("side = '<caret>'")]
#[case::half_typed_word("side = B<caret>")]
fn test_guard_accepts(#[case] marked: &str) {
    assert_eq!(labels(marked), vec!["BOTH", "CLIENT", "SERVER"]);
}

#[test]
fn test_half_typed_word_keeps_quoting() {
    let items = complete(ModsTomlFlavor::Forge, "side = B<caret>");
    assert_eq!(item(&items, "BOTH").text_to_insert(), "\"BOTH\"");
}

#[test]
fn test_value_on_next_line_is_a_key_position() {
    let labels = labels("[[mods]]\nlogoBlur =\n<caret>");
    assert!(labels.contains(&"modId".to_string()), "got {:?}", labels);
}
