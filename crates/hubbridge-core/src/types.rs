// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the registry, translators and the public controller.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::HubError;
use crate::traits::Translator;

/// Stable identifier of a hub type.
///
/// Ids may be written as strings or integers in configuration. Both forms are
/// normalized to their string rendering, so `1` and `"1"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HubId(String);

impl HubId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a caller-supplied id by its string form.
    pub fn matches(&self, other: &str) -> bool {
        self.0 == HubId::from(other).0
    }
}

impl std::fmt::Display for HubId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HubId {
    fn from(value: &str) -> Self {
        HubId(value.to_string())
    }
}

impl From<String> for HubId {
    fn from(value: String) -> Self {
        HubId::from(value.as_str())
    }
}

impl From<i64> for HubId {
    fn from(value: i64) -> Self {
        HubId(value.to_string())
    }
}

impl From<u32> for HubId {
    fn from(value: u32) -> Self {
        HubId(value.to_string())
    }
}

impl<'de> Deserialize<'de> for HubId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => HubId::from(s),
            RawId::Int(n) => HubId::from(n),
            // 1.0 renders as "1", matching the integer form.
            RawId::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                HubId::from(f as i64)
            }
            RawId::Float(f) => HubId(f.to_string()),
        })
    }
}

/// Identity and capability metadata for one hub type.
///
/// Constructed from static configuration with `id`, `name` and `translator`;
/// the onboarding fields are filled in once by package discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubDescriptor {
    pub id: HubId,
    pub name: String,
    /// Reference resolvable by the translator loader.
    pub translator: String,
    /// Reference of the onboarding module, discovered from the package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding: Option<String>,
    /// Declarative onboarding UI description, opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_flow: Option<Value>,
}

impl HubDescriptor {
    pub fn new(
        id: impl Into<HubId>,
        name: impl Into<String>,
        translator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            translator: translator.into(),
            onboarding: None,
            onboarding_flow: None,
        }
    }

    /// Copy onboarding metadata from a discovered translator.
    ///
    /// Fields that are already populated are left untouched.
    pub fn enrich(&mut self, info: &TranslatorInfo) {
        if self.onboarding.is_none() {
            self.onboarding = info.onboarding.clone();
        }
        if self.onboarding_flow.is_none() {
            self.onboarding_flow = info.onboarding_flow.clone();
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.onboarding.is_some()
    }
}

/// Metadata for one discovered translator package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub translators: Vec<TranslatorInfo>,
}

/// One translator declared by a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorInfo {
    pub name: String,
    #[serde(default)]
    pub onboarding: Option<String>,
    #[serde(default)]
    pub onboarding_flow: Option<Value>,
}

/// Opaque credential blob owned by the caller.
///
/// The core forwards it to translators and onboarding modules without
/// inspecting it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthInfo(Value);

impl AuthInfo {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl std::fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthInfo([redacted])")
    }
}

/// Provider-specific description of one platform (device) behind a hub.
///
/// `translator` names the platform-level translator; all other fields are
/// kept verbatim for the translator to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformBlob {
    pub translator: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PlatformBlob {
    pub fn new(translator: impl Into<String>) -> Self {
        Self {
            translator: translator.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// Everything a translator needs at construction time.
///
/// Built per call and dropped once the call completes.
#[derive(Clone, Default)]
pub struct TranslatorContext {
    /// Parent hub translator, set for platform-level translators.
    pub hub: Option<Arc<dyn Translator>>,
    /// Credentials for hub-level translators.
    pub auth: Option<AuthInfo>,
    /// Platform blob for platform-level translators.
    pub device: Option<PlatformBlob>,
}

impl TranslatorContext {
    /// Context for a hub-level translator.
    pub fn for_hub(auth: &AuthInfo) -> Self {
        Self {
            hub: None,
            auth: Some(auth.clone()),
            device: None,
        }
    }

    /// Context for a platform-level translator reached through `hub`.
    pub fn for_device(hub: Arc<dyn Translator>, blob: &PlatformBlob) -> Self {
        Self {
            hub: Some(hub),
            auth: None,
            device: Some(blob.clone()),
        }
    }
}

impl std::fmt::Debug for TranslatorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorContext")
            .field("hub", &self.hub.as_ref().map(|h| h.name().to_string()))
            .field("auth", &self.auth)
            .field("device", &self.device)
            .finish()
    }
}

/// A per-item translation failure reported as data inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFault {
    pub status_code: u16,
    pub message: String,
}

impl PlatformFault {
    pub fn from_error(err: &HubError) -> Self {
        Self {
            status_code: err.status_code().unwrap_or(500),
            message: err.to_string(),
        }
    }
}

/// Translated platforms plus the items that could not be translated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformBatch {
    #[serde(default)]
    pub platforms: Vec<Value>,
    #[serde(default)]
    pub errors: Vec<PlatformFault>,
}

impl PlatformBatch {
    /// Translate items one at a time, recording failures per item instead of
    /// aborting the batch.
    pub fn collect<I, F>(items: I, mut translate: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Result<Value, HubError>,
    {
        let mut batch = PlatformBatch::default();
        for item in items {
            match translate(item) {
                Ok(platform) => batch.platforms.push(platform),
                Err(err) => batch.errors.push(PlatformFault::from_error(&err)),
            }
        }
        batch
    }

    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of a subscribe, unsubscribe or verification call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResult {
    /// Body to echo back to the provider (verification challenge).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Subscription lifetime in seconds; 0 once unsubscribed.
    #[serde(default)]
    pub expiration: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hub_id_from_integer_and_string_compare_equal() {
        let numeric: HubId = serde_json::from_value(json!(1)).unwrap();
        let text: HubId = serde_json::from_value(json!("1")).unwrap();
        assert_eq!(numeric, text);
        assert!(numeric.matches("1"));
        assert!(!numeric.matches("2"));
    }

    #[test]
    fn hub_id_comparison_is_exact_on_text() {
        let id = HubId::from("mock");
        assert!(id.matches("mock"));
        assert!(!id.matches(" mock "));
        assert!(!id.matches("Mock"));
    }

    #[test]
    fn hub_id_whole_float_normalizes_to_integer_text() {
        let id: HubId = serde_json::from_value(json!(7.0)).unwrap();
        assert_eq!(id.as_str(), "7");
    }

    #[test]
    fn enrich_sets_fields_once() {
        let mut hub = HubDescriptor::new("wink", "Wink Hub", "translator-wink-hub");
        assert!(!hub.is_enriched());

        hub.enrich(&TranslatorInfo {
            name: "wink".into(),
            onboarding: Some("onboarding-wink".into()),
            onboarding_flow: Some(json!([{ "name": "getUserPermissionToken" }])),
        });
        assert!(hub.is_enriched());

        hub.enrich(&TranslatorInfo {
            name: "other".into(),
            onboarding: Some("onboarding-other".into()),
            onboarding_flow: None,
        });
        assert_eq!(hub.onboarding.as_deref(), Some("onboarding-wink"));
    }

    #[test]
    fn auth_info_debug_is_redacted() {
        let auth = AuthInfo::new(json!({ "access": { "token": "secret-token" } }));
        let debug = format!("{auth:?}");
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn platform_blob_keeps_extra_fields() {
        let blob: PlatformBlob = serde_json::from_value(json!({
            "translator": "translator-lightbulb",
            "controlId": "abc123",
        }))
        .unwrap();
        assert_eq!(blob.translator, "translator-lightbulb");
        assert_eq!(blob.fields["controlId"], json!("abc123"));
    }

    #[test]
    fn batch_collect_records_failures_per_item() {
        let batch = PlatformBatch::collect(["bulb", "acme-unknown", "plug"], |model| {
            if model == "acme-unknown" {
                Err(HubError::UnknownPlatform {
                    model: model.to_string(),
                })
            } else {
                Ok(json!({ "model": model }))
            }
        });
        assert_eq!(batch.platforms.len(), 2);
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].status_code, 404);
        assert!(batch.is_partial());
    }
}
