//! Schemas for structured metadata files.
//!
//! A [`SchemaRegistry`] answers which keys are valid at which table path.
//! Registries are derived from annotated example documents; the ones for
//! `mods.toml` and `neoforge.mods.toml` ship with the crate and are exposed
//! through [`ModsTomlFlavor::schema`].

mod entry;
mod error;
pub mod mods_toml;
mod registry;

pub use entry::{SchemaEntry, SchemaTable, SchemaValueType};
pub use error::SchemaError;
pub use mods_toml::{KnownValues, ModsTomlFlavor};
pub use registry::SchemaRegistry;
