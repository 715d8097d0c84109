//! # mcdev-base
//!
//! Editor support for Minecraft mod metadata files and Mixin injectors.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide        → Completion, hover, AnalysisHost
//!   ↓
//! validation → mods.toml diagnostics      mixin → injector checks
//!   ↓
//! config     → Platform and check options
//!   ↓
//! schema     → Bundled mods.toml schemas, known values
//!   ↓
//! parser     → Logos lexer, tolerant TOML parser, typed AST
//!   ↓
//! base       → Line index, positions
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → schema → config → validation/mixin → ide)
// ============================================================================

/// Foundation types: LineIndex, LineCol, Span
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Schema: annotated example files → valid keys and tables
pub mod schema;

/// Configuration: target platform, check options
pub mod config;

/// Diagnostics for mods files
pub mod validation;

/// Mixin injector checks
pub mod mixin;

/// IDE features: completion, hover, analysis host
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Span, TextRange, TextSize};

pub use config::{AnalysisConfig, InjectIntoConstructorOptions, Platform};
pub use ide::{Analysis, AnalysisHost, CompletionItem, CompletionKind, HoverResult};
pub use schema::{ModsTomlFlavor, SchemaError, SchemaRegistry};
pub use validation::{Diagnostic, Severity};
