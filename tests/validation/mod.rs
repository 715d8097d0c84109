//! mods.toml diagnostics tests
