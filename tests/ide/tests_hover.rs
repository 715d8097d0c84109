//! Hover tests for mods.toml keys and headers.

use rstest::rstest;

use crate::helpers::completion_helpers::extract_caret;
use crate::helpers::source_fixtures::FORGE_MODS_TOML;
use mcdev::ide::{HoverResult, hover};
use mcdev::parser::parse;
use mcdev::schema::ModsTomlFlavor;

fn hover_at(flavor: ModsTomlFlavor, marked: &str) -> Option<HoverResult> {
    let (text, offset) = extract_caret(marked);
    let file = parse(&text).tree();
    hover(&file, flavor.schema(), offset)
}

#[rstest]
#[case("mod<caret>Loader=\"javafml\"", "**modLoader**: String *(required)*")]
#[case("[[mods]]\nlogo<caret>Blur=true", "**logoBlur**: Boolean")]
#[case("[[dependencies.x]]\nsi<caret>de=\"BOTH\"", "**side**: String")]
#[case("[[mo<caret>ds]]", "**[[mods]]** *(required)*")]
#[case("[mod<caret>properties.x]", "**[modproperties]**")]
fn test_hover_heading(#[case] marked: &str, #[case] heading: &str) {
    let result = hover_at(ModsTomlFlavor::Forge, marked).expect("hover");
    let first_line = result.contents.lines().next().unwrap_or_default();
    assert_eq!(first_line, heading);
}

#[test]
fn test_hover_includes_description() {
    let result = hover_at(ModsTomlFlavor::Forge, "[[dependencies.x]]\nsi<caret>de=\"BOTH\"").unwrap();
    assert!(
        result.contents.ends_with("Side this dependency is applied on - BOTH, CLIENT, or SERVER"),
        "got {:?}",
        result.contents
    );
}

#[test]
fn test_hover_multi_line_description() {
    let result = hover_at(ModsTomlFlavor::Forge, "[[mods]]\ndisplay<caret>Test=\"NONE\"").unwrap();
    assert!(result.contents.contains("MATCH_VERSION means"));
    assert!(result.contents.contains("\nNONE means"));
}

#[test]
fn test_hover_range_is_the_segment() {
    let (text, offset) = extract_caret("[[mods]]\nmod<caret>Id=\"x\"");
    let file = parse(&text).tree();
    let result = hover(&file, ModsTomlFlavor::Forge.schema(), offset).unwrap();
    assert_eq!(&text[result.range], "modId");
}

#[rstest]
#[case::unknown_key("nothing<caret> = 1")]
#[case::value("side = \"BO<caret>TH\"")]
#[case::second_segment("[[dependencies.ex<caret>amplemod]]")]
#[case::inline_table("dep = { si<caret>de = \"BOTH\" }")]
#[case::flavor_specific("[[dependencies.x]]\nty<caret>pe=\"required\"")]
fn test_no_hover(#[case] marked: &str) {
    assert!(hover_at(ModsTomlFlavor::Forge, marked).is_none());
}

#[test]
fn test_neoforge_hover() {
    let result =
        hover_at(ModsTomlFlavor::NeoForge, "[[dependencies.x]]\nty<caret>pe=\"required\"").unwrap();
    assert!(result.contents.starts_with("**type**: String *(required)*"));
}

#[test]
fn test_hover_over_full_fixture() {
    let offset = FORGE_MODS_TOML.find("ordering").unwrap() as u32 + 2;
    let file = parse(FORGE_MODS_TOML).tree();
    let result = hover(&file, ModsTomlFlavor::Forge.schema(), offset.into()).unwrap();
    assert!(result.contents.starts_with("**ordering**: String"));
}
