//! Bundled schemas and value tables for mod metadata files.

use std::path::Path;
use std::sync::LazyLock;

use super::registry::SchemaRegistry;

const FORGE_SCHEMA_SOURCE: &str = include_str!("../../resources/mods.toml");
const NEOFORGE_SCHEMA_SOURCE: &str = include_str!("../../resources/neoforge.mods.toml");

static FORGE_SCHEMA: LazyLock<SchemaRegistry> =
    LazyLock::new(|| load_bundled("mods.toml", FORGE_SCHEMA_SOURCE));
static NEOFORGE_SCHEMA: LazyLock<SchemaRegistry> =
    LazyLock::new(|| load_bundled("neoforge.mods.toml", NEOFORGE_SCHEMA_SOURCE));

fn load_bundled(name: &str, source: &str) -> SchemaRegistry {
    match SchemaRegistry::from_example(source) {
        Ok(schema) => schema,
        Err(err) => {
            tracing::warn!("bundled schema {} failed to load: {}", name, err);
            SchemaRegistry::default()
        }
    }
}

pub const MOD_LOADERS: &[&str] = &["javafml"];
pub const KNOWN_SUBSTITUTIONS: &[&str] = &[
    "${file.jarVersion}",
    "${global.mcVersion}",
    "${global.forgeVersion}",
];
pub const DISPLAY_TESTS: &[&str] = &[
    "MATCH_VERSION",
    "IGNORE_SERVER_VERSION",
    "IGNORE_ALL_VERSION",
    "NONE",
];
pub const DEPENDENCY_ORDER: &[&str] = &["NONE", "BEFORE", "AFTER"];
pub const DEPENDENCY_SIDES: &[&str] = &["BOTH", "CLIENT", "SERVER"];
pub const NEOFORGE_DEPENDENCY_TYPES: &[&str] = &["required", "optional", "incompatible", "discouraged"];

/// A key with a fixed set of suggested string values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnownValues {
    pub key: &'static str,
    pub values: &'static [&'static str],
    /// Whether values outside the set are invalid (not just unsuggested).
    pub exhaustive: bool,
}

const FORGE_KNOWN_VALUES: &[KnownValues] = &[
    KnownValues { key: "modLoader", values: MOD_LOADERS, exhaustive: false },
    KnownValues { key: "version", values: KNOWN_SUBSTITUTIONS, exhaustive: false },
    KnownValues { key: "displayTest", values: DISPLAY_TESTS, exhaustive: true },
    KnownValues { key: "ordering", values: DEPENDENCY_ORDER, exhaustive: true },
    KnownValues { key: "side", values: DEPENDENCY_SIDES, exhaustive: true },
];

const NEOFORGE_KNOWN_VALUES: &[KnownValues] = &[
    KnownValues { key: "modLoader", values: MOD_LOADERS, exhaustive: false },
    KnownValues { key: "version", values: KNOWN_SUBSTITUTIONS, exhaustive: false },
    KnownValues { key: "displayTest", values: DISPLAY_TESTS, exhaustive: true },
    KnownValues { key: "ordering", values: DEPENDENCY_ORDER, exhaustive: true },
    KnownValues { key: "side", values: DEPENDENCY_SIDES, exhaustive: true },
    KnownValues { key: "type", values: NEOFORGE_DEPENDENCY_TYPES, exhaustive: true },
];

/// Which loader's metadata format a document uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModsTomlFlavor {
    Forge,
    NeoForge,
}

impl ModsTomlFlavor {
    pub const FORGE_FILE_NAME: &'static str = "mods.toml";
    pub const NEOFORGE_FILE_NAME: &'static str = "neoforge.mods.toml";

    /// Pick the flavor from a bare file name; other names are not mods files.
    pub fn from_file_name(name: &str) -> Option<Self> {
        match name {
            Self::NEOFORGE_FILE_NAME => Some(Self::NeoForge),
            Self::FORGE_FILE_NAME => Some(Self::Forge),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_file_name)
    }

    /// The bundled schema, built on first use.
    pub fn schema(self) -> &'static SchemaRegistry {
        match self {
            Self::Forge => &FORGE_SCHEMA,
            Self::NeoForge => &NEOFORGE_SCHEMA,
        }
    }

    pub fn known_values(self) -> &'static [KnownValues] {
        match self {
            Self::Forge => FORGE_KNOWN_VALUES,
            Self::NeoForge => NEOFORGE_KNOWN_VALUES,
        }
    }

    pub fn known_values_for(self, key: &str) -> Option<&'static KnownValues> {
        self.known_values().iter().find(|k| k.key == key)
    }
}
