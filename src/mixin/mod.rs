//! Mixin: injector checks over host-resolved bytecode targets.

mod inspection;
mod opcodes;
mod target;

pub use inspection::{InjectIntoConstructorInspection, INJECT_INTO_CONSTRUCTOR_MESSAGE, check_method};
pub use opcodes::Opcode;
pub use target::{
    CONSTRUCTOR_NAME, InjectorAnnotation, InjectorKind, InjectorMethod, Instruction,
    ResolvedTarget, TargetMember,
};
