// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for controller integration testing.
//!
//! `TestHarness` wires a [`HubController`] to a translator registry holding
//! the mock translators, with package discovery routed through a
//! [`CountingPackageSource`] so tests can observe and break it.

use std::sync::Arc;

use hubbridge::{HubController, SignatureSettings};
use hubbridge_core::{AuthInfo, HubDescriptor, PackageInfo, PlatformBlob, TranslatorInfo};
use hubbridge_plugin::TranslatorRegistry;
use serde_json::json;

use crate::counting_source::CountingPackageSource;
use crate::mock_hub::{FlakyHubTranslator, HubCallLog, MockHubTranslator};
use crate::mock_onboarding::{MOCK_TOKEN, MockOnboarding};
use crate::mock_platform::MockPlatformTranslator;
use crate::{FLAKY_HUB_TRANSLATOR, MOCK_HUB_TRANSLATOR, MOCK_ONBOARDING, MOCK_PLATFORM_TRANSLATOR};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    hubs: Option<Vec<HubDescriptor>>,
    signatures: Option<SignatureSettings>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            hubs: None,
            signatures: None,
        }
    }

    /// Replace the default hub list.
    pub fn with_hubs(mut self, hubs: Vec<HubDescriptor>) -> Self {
        self.hubs = Some(hubs);
        self
    }

    /// Use a non-default signature header or algorithm.
    pub fn with_signature_settings(mut self, settings: SignatureSettings) -> Self {
        self.signatures = Some(settings);
        self
    }

    pub fn build(self) -> TestHarness {
        let hub_calls = HubCallLog::default();
        let registry = Arc::new(mock_registry_with_call_log(hub_calls.clone()));
        let packages = Arc::new(CountingPackageSource::new(registry.clone()));
        let hubs = self.hubs.unwrap_or_else(default_hubs);

        let mut controller =
            HubController::new(hubs, packages.clone(), registry.clone(), registry.clone());
        if let Some(settings) = self.signatures {
            controller = controller.with_signature_settings(settings);
        }

        TestHarness {
            controller,
            packages,
            registry,
            hub_calls,
        }
    }
}

/// A controller over mock translators plus handles to its collaborators.
pub struct TestHarness {
    pub controller: HubController,
    pub packages: Arc<CountingPackageSource>,
    pub registry: Arc<TranslatorRegistry>,
    pub hub_calls: HubCallLog,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Credentials the mock hub accepts.
    pub fn auth() -> AuthInfo {
        AuthInfo::new(json!({ "access": { "token": MOCK_TOKEN } }))
    }

    /// Operations the mock hub translators have received so far.
    pub async fn hub_calls(&self) -> Vec<String> {
        self.hub_calls.lock().await.clone()
    }

    /// Blob for the first canned lightbulb.
    pub fn lightbulb() -> PlatformBlob {
        PlatformBlob::new(MOCK_PLATFORM_TRANSLATOR).with_field("controlId", json!("bulb-1"))
    }
}

/// Hubs used unless a test supplies its own: a named mock hub, a mock hub
/// with a numeric id and a hub whose upstream always fails.
pub fn default_hubs() -> Vec<HubDescriptor> {
    vec![
        HubDescriptor::new("mock", "Mock Hub", MOCK_HUB_TRANSLATOR),
        HubDescriptor::new(1_i64, "Numbered Mock Hub", MOCK_HUB_TRANSLATOR),
        HubDescriptor::new("flaky", "Flaky Hub", FLAKY_HUB_TRANSLATOR),
    ]
}

/// Registry holding every mock translator and the mock onboarding module.
///
/// The flaky hub's package declares no translators, so it is never enriched
/// with an onboarding reference.
pub fn mock_registry() -> TranslatorRegistry {
    mock_registry_with_call_log(HubCallLog::default())
}

/// [`mock_registry`] with mock hub operations recorded into `calls`.
pub fn mock_registry_with_call_log(calls: HubCallLog) -> TranslatorRegistry {
    let mut registry = TranslatorRegistry::new();
    registry.register_translator(
        MOCK_HUB_TRANSLATOR,
        vec![package(
            MOCK_HUB_TRANSLATOR,
            vec![TranslatorInfo {
                name: "mock-hub".to_string(),
                onboarding: Some(MOCK_ONBOARDING.to_string()),
                onboarding_flow: Some(json!([
                    { "name": "getUserPermissionToken", "flow": [
                        { "id": "username", "type": "text" },
                        { "id": "password", "type": "password" }
                    ] }
                ])),
            }],
        )],
        MockHubTranslator::logging_factory(calls),
    );
    registry.register_translator(
        MOCK_PLATFORM_TRANSLATOR,
        vec![package(
            MOCK_PLATFORM_TRANSLATOR,
            vec![TranslatorInfo {
                name: "mock-lightbulb".to_string(),
                onboarding: None,
                onboarding_flow: None,
            }],
        )],
        MockPlatformTranslator::factory,
    );
    registry.register_translator(
        FLAKY_HUB_TRANSLATOR,
        vec![package(FLAKY_HUB_TRANSLATOR, Vec::new())],
        FlakyHubTranslator::factory,
    );
    registry.register_onboarding(MOCK_ONBOARDING, Arc::new(MockOnboarding));
    registry
}

fn package(name: &str, translators: Vec<TranslatorInfo>) -> PackageInfo {
    PackageInfo {
        name: name.to_string(),
        version: "1.0.0".to_string(),
        translators,
    }
}
