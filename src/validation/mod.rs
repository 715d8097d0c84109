//! Validation: diagnostics for mods files.
//!
//! [`check_mods_toml`] runs the schema checks; front-end syntax errors are
//! converted with [`Diagnostic::from_syntax_error`] and reported alongside.

mod diagnostics;
mod mods_toml;

pub use diagnostics::{Diagnostic, DiagnosticCollector, RelatedInfo, Severity, codes};
pub use mods_toml::{ModsTomlChecker, check_mods_toml, is_valid_mod_id};
