//! Tolerant TOML parser tests over realistic and half-typed documents.

use rstest::rstest;

use crate::helpers::source_fixtures::{FORGE_MODS_TOML, NEOFORGE_MODS_TOML};
use mcdev::parser::{AstNode, LiteralKind, Value, parse};

#[rstest]
#[case(FORGE_MODS_TOML)]
#[case(NEOFORGE_MODS_TOML)]
#[case(include_str!("../../resources/mods.toml"))]
#[case(include_str!("../../resources/neoforge.mods.toml"))]
fn test_documents_parse_cleanly_and_losslessly(#[case] text: &str) {
    let parsed = parse(text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    assert_eq!(parsed.syntax().text().to_string(), text);
}

#[rstest]
#[case::missing_value("[[mods]]\nmodId =\nversion = \"1\"\n")]
#[case::missing_equals("[[mods]]\nmodId\nversion = \"1\"\n")]
#[case::open_header("[[mods\nversion = \"1\"\n")]
#[case::open_string("[[mods]]\nmodId = \"abc\nversion = \"1\"\n")]
#[case::stray_tokens("[[mods]]\n= = =\nversion = \"1\"\n")]
fn test_recovery_keeps_following_lines(#[case] text: &str) {
    let parsed = parse(text);
    assert!(!parsed.ok());
    assert_eq!(parsed.syntax().text().to_string(), text);

    let file = parsed.tree();
    let table = file.tables().next().expect("table");
    assert_eq!(table.name().as_deref(), Some("mods"));
    assert!(
        table.entries().any(|kv| kv.key_text().as_deref() == Some("version")),
        "version lost after recovery in {:?}",
        text
    );
}

#[test]
fn test_fixture_structure() {
    let file = parse(FORGE_MODS_TOML).tree();
    assert_eq!(file.entries().count(), 4);

    let names: Vec<_> = file
        .tables()
        .map(|t| (t.name().unwrap().to_string(), t.is_array()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("mods".to_string(), true),
            ("dependencies".to_string(), true),
            ("dependencies".to_string(), true),
            ("modproperties".to_string(), false),
        ]
    );
}

#[test]
fn test_multiline_description_value() {
    let file = parse(FORGE_MODS_TOML).tree();
    let mods = file.tables().next().unwrap();
    let description = mods
        .entries()
        .find(|kv| kv.key_text().as_deref() == Some("description"))
        .and_then(|kv| kv.value())
        .unwrap();
    let Value::Literal(literal) = description else {
        panic!("expected a literal");
    };
    assert_eq!(literal.kind(), LiteralKind::MultilineLiteralString);
    assert_eq!(
        literal.string_value().as_deref(),
        Some("An example mod.\nSpans two lines.\n")
    );
}

#[test]
fn test_header_comment_stays_outside_previous_table() {
    let file = parse(FORGE_MODS_TOML).tree();
    let dependencies = file.tables().nth(1).unwrap();
    let header = dependencies.header().unwrap();
    assert!(header.trailing_comment().is_some());
    assert!(dependencies.syntax().text().to_string().starts_with("[[dependencies"));
}
