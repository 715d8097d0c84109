//! IDE features: High-level APIs for editor integrations.
//!
//! Each function corresponds to an editor request over a mods.toml
//! document.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **Composable**: Built on top of the schema and the syntax tree
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use mcdev::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_file_content("mods.toml", "modLoader = \"\"");
//!
//! let analysis = host.analysis();
//! let items = analysis.completions("mods.toml", 0, 13);
//! ```

mod analysis;
mod completion;
mod context;
mod hover;
mod providers;

pub use analysis::{Analysis, AnalysisHost};
pub use completion::{CompletionItem, CompletionKind, completions};
pub use context::{CompletionContext, CompletionPosition, KeyOwner, ValueSlot, value_slot};
pub use hover::{HoverResult, hover};
pub use providers::{
    BooleanCompletionProvider, CompletionProvider, KeyCompletionProvider,
    KnownValuesCompletionProvider, ModsTomlCompletion,
};
