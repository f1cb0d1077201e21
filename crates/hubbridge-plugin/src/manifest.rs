// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translator package manifest parsing from `package.toml` files.
//!
//! A package declares one or more translators together with the onboarding
//! module and onboarding flow each of them uses.

use hubbridge_core::{HubError, PackageInfo, TranslatorInfo};
use serde::Deserialize;

/// Intermediate TOML deserialization struct for `package.toml`.
#[derive(Debug, Deserialize)]
struct PackageManifestFile {
    package: PackageSection,
    #[serde(default)]
    translators: Vec<TranslatorSection>,
}

/// The `[package]` section.
#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
    version: String,
}

/// One `[[translators]]` entry.
#[derive(Debug, Deserialize)]
struct TranslatorSection {
    name: String,
    onboarding: Option<String>,
    onboarding_flow: Option<serde_json::Value>,
}

/// Parse a package manifest from TOML content.
///
/// Validates that the package name is non-empty, the version is a semantic
/// version, and every translator has a name.
pub fn parse_package_manifest(toml_content: &str) -> Result<PackageInfo, HubError> {
    let file: PackageManifestFile = toml::from_str(toml_content)
        .map_err(|e| HubError::Config(format!("invalid package manifest: {e}")))?;

    let section = file.package;

    if section.name.trim().is_empty() {
        return Err(HubError::Config(
            "package manifest: name must not be empty".to_string(),
        ));
    }

    semver::Version::parse(&section.version).map_err(|e| {
        HubError::Config(format!(
            "package manifest: invalid version '{}': {e}",
            section.version
        ))
    })?;

    let mut translators = Vec::with_capacity(file.translators.len());
    for (i, t) in file.translators.into_iter().enumerate() {
        if t.name.trim().is_empty() {
            return Err(HubError::Config(format!(
                "package manifest: translators[{i}].name must not be empty"
            )));
        }
        translators.push(TranslatorInfo {
            name: t.name,
            onboarding: t.onboarding,
            onboarding_flow: t.onboarding_flow,
        });
    }

    Ok(PackageInfo {
        name: section.name,
        version: section.version,
        translators,
    })
}
