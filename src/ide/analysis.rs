//! AnalysisHost and Analysis: Unified state management for IDE features.
//!
//! The `AnalysisHost` owns all mutable state and provides `Analysis` snapshots
//! for querying. This pattern ensures consistent reads across multiple queries.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply file changes
//! host.set_file_content("META-INF/mods.toml", content);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let items = analysis.completions("META-INF/mods.toml", line, col);
//! let diagnostics = analysis.diagnostics("META-INF/mods.toml");
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::base::{LineCol, LineIndex};
use crate::config::AnalysisConfig;
use crate::mixin::{InjectIntoConstructorInspection, InjectorMethod};
use crate::parser::{Parse, SyntaxError, TextSize, TomlFile, parse};
use crate::schema::ModsTomlFlavor;
use crate::validation::{Diagnostic, check_mods_toml};

use super::{CompletionItem, HoverResult, ModsTomlCompletion};

/// A parsed document and its line table.
struct SourceFile {
    parse: Parse,
    line_index: LineIndex,
}

impl SourceFile {
    fn tree(&self) -> TomlFile {
        self.parse.tree()
    }
}

/// Owns all mutable state for the IDE layer.
///
/// Apply changes via `set_file_content()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
#[derive(Default)]
pub struct AnalysisHost {
    files: HashMap<PathBuf, SourceFile>,
    config: AnalysisConfig,
}

impl AnalysisHost {
    /// Create a new empty AnalysisHost.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            files: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    /// Set the content of a file, parsing it and storing the result.
    ///
    /// Returns parse errors if any.
    pub fn set_file_content(&mut self, path: impl AsRef<Path>, content: &str) -> Vec<SyntaxError> {
        let parse = parse(content);
        let errors = parse.errors.clone();
        tracing::debug!(
            path = %path.as_ref().display(),
            errors = errors.len(),
            "updated file"
        );
        self.files.insert(
            path.as_ref().to_path_buf(),
            SourceFile {
                parse,
                line_index: LineIndex::new(content),
            },
        );
        errors
    }

    /// Remove a file from storage.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        self.files.remove(path.as_ref());
    }

    /// Check if a file exists in storage.
    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Get the number of files loaded.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            files: &self.files,
            config: &self.config,
        }
    }
}

/// An immutable snapshot of the analysis state.
///
/// All IDE queries go through this struct to ensure consistent results.
/// Positions are 0-indexed lines and UTF-8 byte columns.
pub struct Analysis<'a> {
    files: &'a HashMap<PathBuf, SourceFile>,
    config: &'a AnalysisConfig,
}

impl<'a> Analysis<'a> {
    // ==================== mods.toml features ====================

    /// Get completions at a position.
    pub fn completions(&self, path: impl AsRef<Path>, line: u32, col: u32) -> Vec<CompletionItem> {
        let Some((file, flavor, offset)) = self.locate(path.as_ref(), line, col) else {
            return Vec::new();
        };
        ModsTomlCompletion::for_flavor(flavor).completions(&file.tree(), offset)
    }

    /// Get hover information at a position.
    pub fn hover(&self, path: impl AsRef<Path>, line: u32, col: u32) -> Option<HoverResult> {
        let (file, flavor, offset) = self.locate(path.as_ref(), line, col)?;
        super::hover(&file.tree(), flavor.schema(), offset)
    }

    /// Syntax errors and schema diagnostics for a mods file.
    pub fn diagnostics(&self, path: impl AsRef<Path>) -> Vec<Diagnostic> {
        let path = path.as_ref();
        let (Some(file), Some(flavor)) = (self.files.get(path), ModsTomlFlavor::from_path(path))
        else {
            return Vec::new();
        };
        let mut diagnostics: Vec<Diagnostic> = file
            .parse
            .errors
            .iter()
            .map(Diagnostic::from_syntax_error)
            .collect();
        diagnostics.extend(check_mods_toml(&file.tree(), flavor, self.config));
        diagnostics.sort_by_key(|d| (d.range.start(), d.range.end()));
        diagnostics
    }

    // ==================== Mixin features ====================

    /// Run the `@Inject` constructor check under the configured platform.
    pub fn inject_into_constructor(&self, methods: &[InjectorMethod]) -> Vec<Diagnostic> {
        InjectIntoConstructorInspection::from_config(self.config).check(methods)
    }

    // ==================== Accessors ====================

    pub fn line_index(&self, path: impl AsRef<Path>) -> Option<&'a LineIndex> {
        self.files.get(path.as_ref()).map(|f| &f.line_index)
    }

    pub fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    fn locate(&self, path: &Path, line: u32, col: u32) -> Option<(&'a SourceFile, ModsTomlFlavor, TextSize)> {
        let flavor = ModsTomlFlavor::from_path(path)?;
        let file = self.files.get(path)?;
        let offset = file.line_index.offset(LineCol::new(line, col))?;
        Some((file, flavor, offset))
    }
}
