//! `@Inject` into constructor tests.

use rstest::rstest;

use mcdev::config::{AnalysisConfig, Platform};
use mcdev::mixin::{
    INJECT_INTO_CONSTRUCTOR_MESSAGE, InjectIntoConstructorInspection, InjectorKind, InjectorMethod,
    Instruction, Opcode, ResolvedTarget, TargetMember,
};
use mcdev::validation::{Severity, codes};
use mcdev::{TextRange, TextSize};

const OWNER: &str = "net/minecraft/world/level/Level";

fn annotation(start: u32) -> TextRange {
    TextRange::new(TextSize::new(start), TextSize::new(start + 6))
}

fn constructor(opcodes: &[Opcode]) -> ResolvedTarget {
    ResolvedTarget::new(TargetMember::method(OWNER, "<init>", "()V"), opcodes.iter().copied())
}

fn inject(name: &str, start: u32, targets: Vec<ResolvedTarget>) -> InjectorMethod {
    let mut method = InjectorMethod::new(name, InjectorKind::Inject, annotation(start));
    method.targets = targets;
    method
}

fn check(methods: &[InjectorMethod]) -> Vec<mcdev::Diagnostic> {
    InjectIntoConstructorInspection::default().check(methods)
}

#[rstest]
#[case::super_call_then_return(&[Opcode::ALOAD, Opcode::INVOKESPECIAL, Opcode::RETURN], true)]
#[case::return_only(&[Opcode::RETURN], false)]
#[case::several_returns(&[Opcode::RETURN, Opcode::RETURN], false)]
#[case::field_store(&[Opcode::PUTFIELD], true)]
#[case::new_object(&[Opcode::NEW, Opcode::DUP], true)]
#[case::nothing_matched(&[], false)]
fn test_constructor_instructions(#[case] opcodes: &[Opcode], #[case] flagged: bool) {
    let found = check(&[inject("onInit", 10, vec![constructor(opcodes)])]);
    assert_eq!(found.len(), usize::from(flagged));
}

#[test]
fn test_diagnostic_shape() {
    let found = check(&[inject("onInit", 10, vec![constructor(&[Opcode::ALOAD])])]);
    let diag = &found[0];
    assert_eq!(&*diag.message, INJECT_INTO_CONSTRUCTOR_MESSAGE);
    assert_eq!(diag.range, annotation(10));
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.code.as_deref(), Some(codes::INJECT_INTO_CONSTRUCTOR));
}

#[test]
fn test_first_offending_target_stops_the_method() {
    let method = inject(
        "onInit",
        10,
        vec![
            constructor(&[Opcode::RETURN]),
            constructor(&[Opcode::ALOAD]),
            constructor(&[Opcode::INVOKESPECIAL]),
        ],
    );
    assert_eq!(check(&[method]).len(), 1);
}

#[test]
fn test_methods_are_checked_independently() {
    let methods = [
        inject("first", 10, vec![constructor(&[Opcode::ALOAD])]),
        inject("second", 50, vec![constructor(&[Opcode::RETURN])]),
        inject("third", 90, vec![constructor(&[Opcode::GETFIELD])]),
    ];
    let ranges: Vec<_> = check(&methods).into_iter().map(|d| d.range).collect();
    assert_eq!(ranges, vec![annotation(10), annotation(90)]);
}

#[test]
fn test_non_constructor_targets_are_skipped() {
    let method = inject(
        "onTick",
        10,
        vec![
            ResolvedTarget::new(TargetMember::method(OWNER, "tick", "()V"), [Opcode::ALOAD]),
            ResolvedTarget::new(TargetMember::method(OWNER, "<clinit>", "()V"), [Opcode::NEW]),
            ResolvedTarget::new(TargetMember::field(OWNER, "random"), [Opcode::GETFIELD]),
        ],
    );
    assert!(check(&[method]).is_empty());
}

#[test]
fn test_instruction_labels_do_not_matter() {
    let mut target = constructor(&[]);
    target.instructions.push(Instruction::new(Opcode::RETURN).with_label("RETURN"));
    assert!(check(&[inject("onInit", 0, vec![target.clone()])]).is_empty());

    target
        .instructions
        .push(Instruction::new(Opcode::INVOKESPECIAL).with_label("INVOKESPECIAL java/lang/Object.<init> ()V"));
    assert_eq!(check(&[inject("onInit", 0, vec![target])]).len(), 1);
}

#[rstest]
#[case(Platform::Forge, true, 1)]
#[case(Platform::NeoForge, true, 1)]
#[case(Platform::Other, true, 1)]
#[case(Platform::Fabric, true, 0)]
#[case(Platform::Fabric, false, 1)]
fn test_platform_options(#[case] platform: Platform, #[case] allow_on_fabric: bool, #[case] expected: usize) {
    let mut config = AnalysisConfig::default().with_platform(platform);
    config.inject_into_constructor.allow_on_fabric = allow_on_fabric;

    let methods = [inject("onInit", 10, vec![constructor(&[Opcode::ALOAD, Opcode::RETURN])])];
    let inspection = InjectIntoConstructorInspection::from_config(&config);
    assert_eq!(inspection.check(&methods).len(), expected);
}
