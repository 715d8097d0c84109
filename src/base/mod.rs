//! Foundation types for the mcdev toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Span`] - Line/column ranges for diagnostics
//!
//! This module has NO dependencies on other mcdev modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{LineCol, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
