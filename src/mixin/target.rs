//! Resolved injector targets.
//!
//! The host resolves `@At` selectors and target methods against bytecode;
//! these types carry the results into the checks.

use smol_str::SmolStr;

use super::opcodes::Opcode;
use crate::parser::TextRange;

/// JVM name of instance initializers.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// One bytecode instruction matched by an injection point.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub opcode: Opcode,
    /// Disassembly of the instruction, for messages.
    pub label: Option<SmolStr>,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Self { opcode, label: None }
    }

    pub fn with_label(mut self, label: impl Into<SmolStr>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A member a Mixin annotation points at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMember {
    Method {
        owner: SmolStr,
        name: SmolStr,
        descriptor: SmolStr,
    },
    Field {
        owner: SmolStr,
        name: SmolStr,
    },
}

impl TargetMember {
    pub fn method(
        owner: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        descriptor: impl Into<SmolStr>,
    ) -> Self {
        TargetMember::Method {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn field(owner: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        TargetMember::Field {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TargetMember::Method { name, .. } | TargetMember::Field { name, .. } => name,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, TargetMember::Method { name, .. } if name == CONSTRUCTOR_NAME)
    }
}

/// A target member with the instructions the injection point selected in it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedTarget {
    pub member: TargetMember,
    pub instructions: Vec<Instruction>,
}

impl ResolvedTarget {
    pub fn new(member: TargetMember, opcodes: impl IntoIterator<Item = Opcode>) -> Self {
        Self {
            member,
            instructions: opcodes.into_iter().map(Instruction::new).collect(),
        }
    }
}

/// Injector annotations Mixin understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InjectorKind {
    Inject,
    Redirect,
    ModifyArg,
    ModifyArgs,
    ModifyVariable,
    ModifyConstant,
}

impl InjectorKind {
    const PACKAGE: &'static str = "org.spongepowered.asm.mixin.injection.";

    pub fn simple_name(self) -> &'static str {
        match self {
            InjectorKind::Inject => "Inject",
            InjectorKind::Redirect => "Redirect",
            InjectorKind::ModifyArg => "ModifyArg",
            InjectorKind::ModifyArgs => "ModifyArgs",
            InjectorKind::ModifyVariable => "ModifyVariable",
            InjectorKind::ModifyConstant => "ModifyConstant",
        }
    }

    /// Accepts the simple or the fully qualified annotation name.
    pub fn from_annotation_name(name: &str) -> Option<Self> {
        let simple = name.strip_prefix(Self::PACKAGE).unwrap_or(name);
        [
            InjectorKind::Inject,
            InjectorKind::Redirect,
            InjectorKind::ModifyArg,
            InjectorKind::ModifyArgs,
            InjectorKind::ModifyVariable,
            InjectorKind::ModifyConstant,
        ]
        .into_iter()
        .find(|kind| kind.simple_name() == simple)
    }
}

/// The injector annotation on a handler method.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InjectorAnnotation {
    pub kind: InjectorKind,
    /// Range of the annotation name in the Mixin source file.
    pub name_range: TextRange,
}

/// A handler method in a Mixin class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InjectorMethod {
    pub name: SmolStr,
    /// `None` for methods without an injector annotation.
    pub annotation: Option<InjectorAnnotation>,
    pub targets: Vec<ResolvedTarget>,
}

impl InjectorMethod {
    /// A method annotated with `kind`, whose annotation name spans `name_range`.
    pub fn new(name: impl Into<SmolStr>, kind: InjectorKind, name_range: TextRange) -> Self {
        Self {
            name: name.into(),
            annotation: Some(InjectorAnnotation { kind, name_range }),
            targets: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: ResolvedTarget) -> Self {
        self.targets.push(target);
        self
    }
}
