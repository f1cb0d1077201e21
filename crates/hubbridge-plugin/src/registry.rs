// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of compiled-in translators and onboarding modules.
//!
//! The `TranslatorRegistry` stores `TranslatorEntry` records keyed by
//! translator reference. Each entry holds the package metadata reported to
//! discovery and a factory that builds a fresh translator per call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hubbridge_core::{
    HubError, Onboarding, OnboardingLoader, PackageInfo, PackageSource, Translator,
    TranslatorContext, TranslatorLoader,
};

/// Constructor for translator instances from a construction context.
#[async_trait]
pub trait TranslatorConstructor: Send + Sync {
    async fn create(&self, context: TranslatorContext) -> Result<Arc<dyn Translator>, HubError>;
}

#[async_trait]
impl<F> TranslatorConstructor for F
where
    F: Fn(TranslatorContext) -> Result<Arc<dyn Translator>, HubError> + Send + Sync,
{
    async fn create(&self, context: TranslatorContext) -> Result<Arc<dyn Translator>, HubError> {
        self(context)
    }
}

/// A single translator in the registry.
pub struct TranslatorEntry {
    /// Packages reported by discovery for this reference, first one wins.
    pub packages: Vec<PackageInfo>,
    factory: Box<dyn TranslatorConstructor>,
}

impl std::fmt::Debug for TranslatorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorEntry")
            .field("packages", &self.packages)
            .finish_non_exhaustive()
    }
}

/// Static registration table for translators and onboarding modules.
pub struct TranslatorRegistry {
    translators: HashMap<String, TranslatorEntry>,
    onboardings: HashMap<String, Arc<dyn Onboarding>>,
}

impl TranslatorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            translators: HashMap::new(),
            onboardings: HashMap::new(),
        }
    }

    /// Register a translator under `reference`, replacing any previous entry.
    pub fn register_translator(
        &mut self,
        reference: impl Into<String>,
        packages: Vec<PackageInfo>,
        factory: impl TranslatorConstructor + 'static,
    ) {
        let reference = reference.into();
        tracing::debug!(
            translator = %reference,
            packages = packages.len(),
            "registering translator"
        );
        self.translators.insert(
            reference,
            TranslatorEntry {
                packages,
                factory: Box::new(factory),
            },
        );
    }

    /// Register an onboarding module under `reference`.
    pub fn register_onboarding(
        &mut self,
        reference: impl Into<String>,
        onboarding: Arc<dyn Onboarding>,
    ) {
        self.onboardings.insert(reference.into(), onboarding);
    }

    /// Get a translator entry by reference.
    pub fn get(&self, reference: &str) -> Option<&TranslatorEntry> {
        self.translators.get(reference)
    }

    /// Registered translator references, sorted.
    pub fn references(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = self.translators.keys().map(String::as_str).collect();
        refs.sort_unstable();
        refs
    }

    /// Returns the number of registered translators.
    pub fn len(&self) -> usize {
        self.translators.len()
    }

    /// Returns true if no translators are registered.
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    fn entry(&self, reference: &str) -> Result<&TranslatorEntry, HubError> {
        self.translators
            .get(reference)
            .ok_or_else(|| HubError::TranslatorNotFound {
                reference: reference.to_string(),
            })
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageSource for TranslatorRegistry {
    async fn package_info(&self, translator_ref: &str) -> Result<Vec<PackageInfo>, HubError> {
        let entry = self.entry(translator_ref)?;
        if entry.packages.is_empty() {
            return Err(HubError::Discovery {
                reference: translator_ref.to_string(),
                message: "no packages found".to_string(),
            });
        }
        Ok(entry.packages.clone())
    }
}

#[async_trait]
impl TranslatorLoader for TranslatorRegistry {
    async fn create_translator(
        &self,
        translator_ref: &str,
        context: TranslatorContext,
    ) -> Result<Arc<dyn Translator>, HubError> {
        self.entry(translator_ref)?.factory.create(context).await
    }
}

#[async_trait]
impl OnboardingLoader for TranslatorRegistry {
    async fn onboarding(&self, onboarding_ref: &str) -> Result<Arc<dyn Onboarding>, HubError> {
        self.onboardings
            .get(onboarding_ref)
            .cloned()
            .ok_or_else(|| HubError::OnboardingNotFound {
                reference: onboarding_ref.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubbridge_core::{AuthInfo, Operation, TranslatorInfo};
    use serde_json::{json, Value};

    struct EchoTranslator {
        auth: Option<AuthInfo>,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn invoke(&self, operation: &Operation, args: Vec<Value>) -> Result<Value, HubError> {
            match operation {
                Operation::Get => Ok(json!({
                    "args": args,
                    "auth": self.auth.as_ref().map(AuthInfo::as_value),
                })),
                other => Err(other.unsupported_by(self.name())),
            }
        }
    }

    struct StaticOnboarding;

    #[async_trait]
    impl Onboarding for StaticOnboarding {
        async fn onboard(&self, _onboarding_info: Value) -> Result<AuthInfo, HubError> {
            Ok(AuthInfo::new(json!({ "access": { "token": "t" } })))
        }
    }

    fn package(name: &str) -> PackageInfo {
        PackageInfo {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            translators: vec![TranslatorInfo {
                name: name.to_string(),
                onboarding: Some(format!("onboarding-{name}")),
                onboarding_flow: None,
            }],
        }
    }

    fn echo_factory(ctx: TranslatorContext) -> Result<Arc<dyn Translator>, HubError> {
        Ok(Arc::new(EchoTranslator { auth: ctx.auth }))
    }

    #[tokio::test]
    async fn package_info_returns_registered_packages() {
        let mut registry = TranslatorRegistry::new();
        registry.register_translator("echo", vec![package("echo")], echo_factory);

        let packages = registry.package_info("echo").await.unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "echo");
    }

    #[tokio::test]
    async fn package_info_unknown_reference_fails() {
        let registry = TranslatorRegistry::new();
        let err = registry.package_info("missing").await.unwrap_err();
        assert!(matches!(err, HubError::TranslatorNotFound { .. }));
    }

    #[tokio::test]
    async fn package_info_empty_discovery_fails() {
        let mut registry = TranslatorRegistry::new();
        registry.register_translator("bare", vec![], echo_factory);
        let err = registry.package_info("bare").await.unwrap_err();
        assert!(matches!(err, HubError::Discovery { .. }));
    }

    #[tokio::test]
    async fn create_translator_passes_context_through() {
        let mut registry = TranslatorRegistry::new();
        registry.register_translator("echo", vec![package("echo")], echo_factory);

        let auth = AuthInfo::new(json!({ "token": "abc" }));
        let translator = registry
            .create_translator("echo", TranslatorContext::for_hub(&auth))
            .await
            .unwrap();
        let result = translator.invoke(&Operation::Get, vec![json!(true)]).await.unwrap();
        assert_eq!(result["auth"]["token"], "abc");
        assert_eq!(result["args"], json!([true]));
    }

    #[tokio::test]
    async fn create_translator_builds_fresh_instances() {
        let mut registry = TranslatorRegistry::new();
        registry.register_translator("echo", vec![package("echo")], echo_factory);

        let a = registry.create_translator("echo", TranslatorContext::default()).await.unwrap();
        let b = registry.create_translator("echo", TranslatorContext::default()).await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn onboarding_lookup() {
        let mut registry = TranslatorRegistry::new();
        registry.register_onboarding("onboarding-echo", Arc::new(StaticOnboarding));

        let onboarding = registry.onboarding("onboarding-echo").await.unwrap();
        let auth = onboarding.onboard(json!({})).await.unwrap();
        assert_eq!(auth.as_value()["access"]["token"], "t");

        assert!(matches!(
            registry.onboarding("nope").await,
            Err(HubError::OnboardingNotFound { .. })
        ));
    }

    #[test]
    fn references_are_sorted() {
        let mut registry = TranslatorRegistry::new();
        assert!(registry.is_empty());
        registry.register_translator("zebra", vec![], echo_factory);
        registry.register_translator("alpha", vec![], echo_factory);
        assert_eq!(registry.references(), vec!["alpha", "zebra"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("alpha").is_some());
    }
}
