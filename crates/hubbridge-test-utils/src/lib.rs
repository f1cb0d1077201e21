// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for hubbridge integration tests.
//!
//! Provides mock translators and a test harness for fast, deterministic
//! tests without real hubs or network access.
//!
//! # Components
//!
//! - [`MockHubTranslator`] - Hub translator with canned devices, token refresh and challenge echo
//! - [`MockPlatformTranslator`] - Lightbulb translator that echoes resource writes
//! - [`MockOnboarding`] - Username/password onboarding
//! - [`CountingPackageSource`] - Package discovery with call log and failure injection
//! - [`TestHarness`] - Controller wired to all of the above

pub mod counting_source;
pub mod harness;
pub mod mock_hub;
pub mod mock_onboarding;
pub mod mock_platform;

pub use counting_source::CountingPackageSource;
pub use harness::TestHarness;
pub use mock_hub::{FlakyHubTranslator, HubCallLog, MockHubTranslator};
pub use mock_onboarding::MockOnboarding;
pub use mock_platform::MockPlatformTranslator;

pub const MOCK_HUB_TRANSLATOR: &str = "translator-mock-hub";
pub const MOCK_PLATFORM_TRANSLATOR: &str = "translator-mock-lightbulb";
pub const FLAKY_HUB_TRANSLATOR: &str = "translator-flaky-hub";
pub const MOCK_ONBOARDING: &str = "onboarding-mock";
