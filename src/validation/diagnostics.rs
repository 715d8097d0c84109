//! Diagnostics: error and warning reporting for mods files and Mixin checks.

use std::sync::Arc;

use crate::base::{LineIndex, Span};
use crate::parser::{SyntaxError, TextRange};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte range the diagnostic applies to.
    pub range: TextRange,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Optional related information.
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    pub range: TextRange,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(range, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(range, Severity::Warning, message)
    }

    fn new(range: TextRange, severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            range,
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, range: TextRange, message: impl Into<Arc<str>>) -> Self {
        self.related.push(RelatedInfo {
            range,
            message: message.into(),
        });
        self
    }

    /// Line/column span of the diagnostic in its document.
    pub fn span(&self, line_index: &LineIndex) -> Span {
        line_index.span(self.range)
    }

    /// Surface a front-end syntax error.
    pub fn from_syntax_error(error: &SyntaxError) -> Self {
        Self::error(error.range, error.message.as_str()).with_code(codes::SYNTAX_ERROR)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Structural errors in mods files
/// - **E0100-E0199**: Syntax errors
/// - **E0200-E0299**: Mixin injector errors
/// - **W0001-W0099**: Schema warnings in mods files
pub mod codes {
    // ========================================================================
    // STRUCTURAL ERRORS (E0001-E0099)
    // ========================================================================

    /// Key declared twice in the same table.
    pub const DUPLICATE_KEY: &str = "E0001";
    /// `[table]` declared more than once.
    pub const DUPLICATE_TABLE: &str = "E0002";
    /// `[name]` used where `[[name]]` is expected, or the reverse.
    pub const WRONG_TABLE_FORM: &str = "E0003";

    // ========================================================================
    // SYNTAX ERRORS (E0100-E0199)
    // ========================================================================

    pub const SYNTAX_ERROR: &str = "E0100";

    // ========================================================================
    // MIXIN ERRORS (E0200-E0299)
    // ========================================================================

    /// `@Inject` into a constructor at something other than `RETURN`.
    pub const INJECT_INTO_CONSTRUCTOR: &str = "E0200";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Key or table the schema does not know.
    pub const UNKNOWN_KEY: &str = "W0001";
    /// Value type does not match the schema.
    pub const TYPE_MISMATCH: &str = "W0002";
    /// Value outside a closed set of known values.
    pub const UNKNOWN_VALUE: &str = "W0003";
    /// Mandatory key or table absent.
    pub const MISSING_MANDATORY: &str = "W0004";
    /// Mod id does not match `^[a-z][a-z0-9_]{1,63}$`.
    pub const INVALID_MOD_ID: &str = "W0005";
    /// Dependency block for a mod id not declared in `[[mods]]`.
    pub const UNDECLARED_DEPENDENT: &str = "W0006";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a check.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a duplicate key error.
    pub fn duplicate_key(&mut self, key: &str, range: TextRange, previous: TextRange) {
        self.add(
            Diagnostic::error(range, format!("duplicate key: '{}' is already defined", key))
                .with_code(codes::DUPLICATE_KEY)
                .with_related(previous, format!("previous definition of '{}'", key)),
        );
    }

    /// Add a duplicate table error.
    pub fn duplicate_table(&mut self, name: &str, range: TextRange, previous: TextRange) {
        self.add(
            Diagnostic::error(range, format!("duplicate table: '[{}]' is already defined", name))
                .with_code(codes::DUPLICATE_TABLE)
                .with_related(previous, format!("previous definition of '[{}]'", name)),
        );
    }

    /// Add a type mismatch warning.
    pub fn type_mismatch(&mut self, range: TextRange, expected: &str, found: &str) {
        self.add(
            Diagnostic::warning(
                range,
                format!("type mismatch: expected '{}', found '{}'", expected, found),
            )
            .with_code(codes::TYPE_MISMATCH),
        );
    }

    /// Add an unknown key warning.
    pub fn unknown_key(&mut self, key: &str, table: Option<&str>, range: TextRange) {
        let message = match table {
            Some(table) => format!("unknown key '{}' in '{}'", key, table),
            None => format!("unknown key '{}'", key),
        };
        self.add(Diagnostic::warning(range, message).with_code(codes::UNKNOWN_KEY));
    }

    /// Add a missing mandatory key warning.
    pub fn missing_mandatory(&mut self, what: &str, range: TextRange) {
        self.add(
            Diagnostic::warning(range, format!("missing mandatory {}", what))
                .with_code(codes::MISSING_MANDATORY),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, sorted by position.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics
            .sort_by_key(|d| (d.range.start(), d.range.end()));
        self.diagnostics
    }
}
