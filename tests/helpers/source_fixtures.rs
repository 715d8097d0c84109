//! Common source fixtures for tests.

/// A complete Forge mods.toml with one mod and one dependency.
pub const FORGE_MODS_TOML: &str = r#"# Generated from the MDK
modLoader="javafml" #mandatory
loaderVersion="[47,)" #mandatory
license="MIT"
issueTrackerURL="https://example.invalid/issues"

[[mods]] #mandatory
modId="examplemod" #mandatory
version="${file.jarVersion}" #mandatory
displayName="Example Mod" #mandatory
logoFile="examplemod.png"
logoBlur=false
authors="Someone"
displayTest="MATCH_VERSION"
description='''
An example mod.
Spans two lines.
'''

[[dependencies.examplemod]] #optional
modId="forge" #mandatory
mandatory=true #mandatory
versionRange="[47,)" #mandatory
ordering="NONE"
side="BOTH"

[[dependencies.examplemod]]
modId="minecraft"
mandatory=true
versionRange="[1.20.1,1.21)"
ordering="NONE"
side="BOTH"

[modproperties.examplemod]
anything = "goes"
"#;

/// A complete NeoForge neoforge.mods.toml.
pub const NEOFORGE_MODS_TOML: &str = r#"modLoader="javafml"
loaderVersion="[4,)"
license="MIT"

[[mods]]
modId="examplemod"
version="1.0.0"
displayName="Example Mod"
description='''An example mod.'''

[[mixins]]
config="examplemod.mixins.json"

[[accessTransformers]]
file="META-INF/accesstransformer.cfg"

[[dependencies.examplemod]]
modId="neoforge"
type="required"
versionRange="[21,)"
ordering="NONE"
side="BOTH"
"#;
