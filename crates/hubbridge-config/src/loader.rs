// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./hubbridge.toml` > `~/.config/hubbridge/hubbridge.toml`
//! > `/etc/hubbridge/hubbridge.toml` with environment variable overrides via
//! the `HUBBRIDGE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HubbridgeConfig;

const SYSTEM_CONFIG: &str = "/etc/hubbridge/hubbridge.toml";
const LOCAL_CONFIG: &str = "hubbridge.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/hubbridge/hubbridge.toml` (system-wide)
/// 3. `~/.config/hubbridge/hubbridge.toml` (user XDG config)
/// 4. `./hubbridge.toml` (local directory)
/// 5. `HUBBRIDGE_*` environment variables
pub fn load_config() -> Result<HubbridgeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<HubbridgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HubbridgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HubbridgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HubbridgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HubbridgeConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// The XDG user config path, if the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hubbridge").join(LOCAL_CONFIG))
}

/// Paths searched by [`load_config`], lowest precedence first.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    paths.extend(user_config_path());
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys survive: `HUBBRIDGE_VERIFICATION_SIGNATURE_HEADER` maps to
/// `verification.signature_header`.
fn env_provider() -> Env {
    Env::prefixed("HUBBRIDGE_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("logging_", "logging.", 1)
            .replacen("verification_", "verification.", 1)
            .into()
    })
}
