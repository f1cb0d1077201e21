// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::HubbridgeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HubbridgeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.logging.level.trim().to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.hubs.is_empty() {
        errors.push(ConfigError::Validation {
            message: "at least one [[hubs]] entry is required".to_string(),
        });
    }

    for (i, hub) in config.hubs.iter().enumerate() {
        if hub.id.as_str().trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("hubs[{i}].id must not be empty"),
            });
        }
        if hub.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("hubs[{i}].name must not be empty"),
            });
        }
        if hub.translator.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("hubs[{i}].translator must not be empty"),
            });
        }
    }

    // Ids are normalized to strings, so `1` and "1" collide here.
    let mut seen_ids = HashSet::new();
    for hub in &config.hubs {
        if !hub.id.as_str().trim().is_empty() && !seen_ids.insert(&hub.id) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate hub id `{}` in [[hubs]] array", hub.id),
            });
        }
    }

    if config.verification.signature_header.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "verification.signature_header must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
