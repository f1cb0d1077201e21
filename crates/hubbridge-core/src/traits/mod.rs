// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the hubbridge plugin architecture.
//!
//! Translators, package discovery and onboarding modules live outside the
//! core and are reached only through these traits. All of them use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod discovery;
pub mod onboarding;
pub mod translator;

pub use discovery::{PackageSource, TranslatorLoader};
pub use onboarding::{Onboarding, OnboardingLoader};
pub use translator::Translator;
