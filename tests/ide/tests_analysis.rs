//! AnalysisHost tests: file storage, positions, and config.

use mcdev::config::{AnalysisConfig, Platform};
use mcdev::ide::AnalysisHost;
use mcdev::mixin::{InjectorKind, InjectorMethod, Opcode, ResolvedTarget, TargetMember};
use mcdev::validation::{Severity, codes};
use mcdev::{TextRange, TextSize};

use crate::helpers::source_fixtures::{FORGE_MODS_TOML, NEOFORGE_MODS_TOML};

const FORGE_PATH: &str = "src/main/resources/META-INF/mods.toml";
const NEOFORGE_PATH: &str = "src/main/resources/META-INF/neoforge.mods.toml";

#[test]
fn test_fixtures_have_no_diagnostics() {
    let mut host = AnalysisHost::new();
    assert!(host.set_file_content(FORGE_PATH, FORGE_MODS_TOML).is_empty());
    assert!(host.set_file_content(NEOFORGE_PATH, NEOFORGE_MODS_TOML).is_empty());

    let analysis = host.analysis();
    assert_eq!(analysis.diagnostics(FORGE_PATH), vec![]);
    assert_eq!(analysis.diagnostics(NEOFORGE_PATH), vec![]);
}

#[test]
fn test_unterminated_string_is_a_syntax_error() {
    let mut host = AnalysisHost::new();
    let errors = host.set_file_content(FORGE_PATH, "[[mods]]\nmodId = \"abc\n");
    assert_eq!(errors.len(), 1);

    let diagnostics = host.analysis().diagnostics(FORGE_PATH);
    let syntax: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.code.as_deref() == Some(codes::SYNTAX_ERROR))
        .collect();
    assert_eq!(syntax.len(), 1);
    assert_eq!(syntax[0].severity, Severity::Error);
    assert_eq!(&*syntax[0].message, "unterminated string");
}

#[test]
fn test_completion_by_line_and_column() {
    let mut host = AnalysisHost::new();
    host.set_file_content(FORGE_PATH, "[[mods]]\nmodId=\"x\"\ndisplayTest=\"\"\n");
    let analysis = host.analysis();

    let items = analysis.completions(FORGE_PATH, 2, 13);
    assert_eq!(items.len(), 4);
    assert_eq!(&*items[0].label, "MATCH_VERSION");
}

#[test]
fn test_column_past_line_end_is_clamped() {
    let mut host = AnalysisHost::new();
    host.set_file_content(FORGE_PATH, "side = \n");
    let analysis = host.analysis();
    assert_eq!(analysis.completions(FORGE_PATH, 0, 99).len(), 3);
    assert!(analysis.completions(FORGE_PATH, 7, 0).is_empty());
}

#[test]
fn test_hover_by_line_and_column() {
    let mut host = AnalysisHost::new();
    host.set_file_content(FORGE_PATH, "\nlicense = \"MIT\"\n");
    let analysis = host.analysis();
    let result = analysis.hover(FORGE_PATH, 1, 2).unwrap();
    let span = analysis.line_index(FORGE_PATH).unwrap().span(result.range);
    assert_eq!((span.start.line, span.start.col, span.end.col), (1, 0, 7));
}

#[test]
fn test_diagnostics_are_sorted_and_positioned() {
    let mut host = AnalysisHost::new();
    host.set_file_content(
        FORGE_PATH,
        "modLoader = \"javafml\"\nloaderVersion = \"[47,)\"\nlicense = \"MIT\"\n\n[[mods]]\nmodId = \"x\"\n",
    );
    let analysis = host.analysis();
    let diagnostics = analysis.diagnostics(FORGE_PATH);
    let line_index = analysis.line_index(FORGE_PATH).unwrap();

    let invalid_id = diagnostics
        .iter()
        .find(|d| d.code.as_deref() == Some(codes::INVALID_MOD_ID))
        .unwrap();
    assert_eq!(invalid_id.span(line_index).start.line, 5);
    assert_eq!(invalid_id.severity, Severity::Warning);

    let starts: Vec<_> = diagnostics.iter().map(|d| d.range.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
}

#[test]
fn test_config_controls_unknown_keys() {
    let source = format!("{}\nextra = 1\n", NEOFORGE_MODS_TOML);

    let mut host = AnalysisHost::new();
    host.set_file_content(NEOFORGE_PATH, &source);
    assert_eq!(host.analysis().diagnostics(NEOFORGE_PATH).len(), 1);

    host.set_config(AnalysisConfig {
        report_unknown_keys: false,
        ..AnalysisConfig::default()
    });
    assert!(host.analysis().diagnostics(NEOFORGE_PATH).is_empty());
}

#[test]
fn test_inject_into_constructor_through_host() {
    let method = InjectorMethod::new(
        "onConstruct",
        InjectorKind::Inject,
        TextRange::new(TextSize::new(40), TextSize::new(46)),
    )
    .with_target(ResolvedTarget::new(
        TargetMember::method("net/minecraft/world/entity/Entity", "<init>", "()V"),
        [Opcode::ALOAD, Opcode::INVOKESPECIAL, Opcode::RETURN],
    ));

    let mut host = AnalysisHost::with_config(AnalysisConfig::default().with_platform(Platform::NeoForge));
    let found = host.analysis().inject_into_constructor(std::slice::from_ref(&method));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].range, TextRange::new(TextSize::new(40), TextSize::new(46)));

    host.set_config(AnalysisConfig::default().with_platform(Platform::Fabric));
    assert!(host.analysis().inject_into_constructor(&[method]).is_empty());
}
