//! `@Inject` into constructors.
//!
//! Mixin only allows `@Inject` into a constructor at `RETURN`; any other
//! instruction would run the handler before the object is initialized.
//! Fabric's Mixin fork lifts the restriction, so the check can be disabled
//! there.

use super::opcodes::Opcode;
use super::target::{InjectorKind, InjectorMethod};
use crate::config::AnalysisConfig;
use crate::validation::{Diagnostic, codes};

pub const INJECT_INTO_CONSTRUCTOR_MESSAGE: &str =
    "Cannot inject into constructors at non-return instructions";

/// Reports `@Inject` handlers targeting constructors at non-`RETURN` instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectIntoConstructorInspection {
    enabled: bool,
}

impl Default for InjectIntoConstructorInspection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl InjectIntoConstructorInspection {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            enabled: config.checks_inject_into_constructor(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// At most one diagnostic per method, on its annotation name.
    pub fn check(&self, methods: &[InjectorMethod]) -> Vec<Diagnostic> {
        if !self.enabled {
            tracing::trace!("inject-into-constructor check disabled for platform");
            return Vec::new();
        }
        methods.iter().filter_map(check_method).collect()
    }
}

/// Check a single handler method.
pub fn check_method(method: &InjectorMethod) -> Option<Diagnostic> {
    let annotation = method
        .annotation
        .as_ref()
        .filter(|a| a.kind == InjectorKind::Inject)?;

    for target in method.targets.iter().filter(|t| t.member.is_constructor()) {
        let Some(instruction) = target
            .instructions
            .iter()
            .find(|insn| insn.opcode != Opcode::RETURN)
        else {
            continue;
        };
        tracing::debug!(
            method = %method.name,
            target = target.member.name(),
            opcode = %instruction.opcode,
            "inject into constructor at non-return instruction"
        );
        return Some(
            Diagnostic::error(annotation.name_range, INJECT_INTO_CONSTRUCTOR_MESSAGE)
                .with_code(codes::INJECT_INTO_CONSTRUCTOR),
        );
    }
    None
}
