//! Analysis configuration.
//!
//! Editors hand these settings over once per workspace; with the `serde`
//! feature they deserialize from the client's JSON settings, with every
//! field optional.

/// The mod loader a project targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    #[default]
    Forge,
    NeoForge,
    Fabric,
    Other,
}

/// Options for the `@Inject` into constructor inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct InjectIntoConstructorOptions {
    /// Fabric's Mixin fork supports injecting anywhere in a constructor.
    pub allow_on_fabric: bool,
}

impl Default for InjectIntoConstructorOptions {
    fn default() -> Self {
        Self {
            allow_on_fabric: true,
        }
    }
}

/// Settings shared by every analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AnalysisConfig {
    pub platform: Platform,
    pub inject_into_constructor: InjectIntoConstructorOptions,
    /// Report keys the schema does not know about.
    pub report_unknown_keys: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            inject_into_constructor: InjectIntoConstructorOptions::default(),
            report_unknown_keys: true,
        }
    }
}

impl AnalysisConfig {
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Whether the constructor injection check runs at all for this project.
    pub fn checks_inject_into_constructor(&self) -> bool {
        !(self.platform == Platform::Fabric && self.inject_into_constructor.allow_on_fabric)
    }
}
