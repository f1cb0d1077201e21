// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for hubbridge.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use hubbridge_core::signature::DEFAULT_SIGNATURE_HEADER;
use hubbridge_core::{HubDescriptor, HubId, SignatureAlgorithm};
use serde::{Deserialize, Serialize};

/// Top-level hubbridge configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HubbridgeConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Static list of supported hubs. Defaults to the built-in catalog.
    #[serde(default = "default_hubs")]
    pub hubs: Vec<HubEntryConfig>,

    /// Inbound webhook signature settings.
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl Default for HubbridgeConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            hubs: default_hubs(),
            verification: VerificationConfig::default(),
        }
    }
}

impl HubbridgeConfig {
    /// Hub descriptors in declaration order, ready for the hub registry.
    pub fn hub_descriptors(&self) -> Vec<HubDescriptor> {
        self.hubs.iter().map(HubEntryConfig::to_descriptor).collect()
    }
}

fn default_hubs() -> Vec<HubEntryConfig> {
    hubbridge_plugin::builtin_hubs()
        .into_iter()
        .map(|hub| HubEntryConfig {
            id: hub.id,
            name: hub.name,
            translator: hub.translator,
        })
        .collect()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// One `[[hubs]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HubEntryConfig {
    /// Stable hub id. Integers are accepted and compared as strings.
    pub id: HubId,

    /// Display name.
    pub name: String,

    /// Translator reference resolved through the translator registry.
    pub translator: String,
}

impl HubEntryConfig {
    pub fn to_descriptor(&self) -> HubDescriptor {
        HubDescriptor::new(self.id.clone(), self.name.clone(), self.translator.clone())
    }
}

/// Default HMAC settings for inbound notifications.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationConfig {
    /// Header carrying the provider signature.
    #[serde(default = "default_signature_header")]
    pub signature_header: String,

    /// Digest used unless the caller overrides it per request.
    #[serde(default)]
    pub algorithm: SignatureAlgorithm,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            signature_header: default_signature_header(),
            algorithm: SignatureAlgorithm::default(),
        }
    }
}

fn default_signature_header() -> String {
    DEFAULT_SIGNATURE_HEADER.to_string()
}
