// SPDX-FileCopyrightText: 2026 Weft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./weft.toml` > `~/.config/weft/weft.toml` > `/etc/weft/weft.toml`,
//! with environment variable overrides via the `WEFT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WeftConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/weft/weft.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "weft.toml";

/// The per-user config file, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("weft/weft.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/weft/weft.toml`
/// 3. `~/.config/weft/weft.toml`
/// 4. `./weft.toml`
/// 5. `WEFT_*` environment variables
pub fn load_config() -> Result<WeftConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<WeftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WeftConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WeftConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WeftConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(WeftConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// `Env::split("_")` would turn `WEFT_FACTORY_INNER_IDS` into
/// `factory.inner.ids`; only the first segment names a section.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("WEFT_").map(|key| {
        key.as_str()
            .replacen("host_", "host.", 1)
            .replacen("factory_", "factory.", 1)
            .into()
    })
}
