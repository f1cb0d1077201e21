// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the hubbridge hub-abstraction layer.
//!
//! This crate provides the error taxonomy, shared types, operation names and
//! collaborator traits used throughout the workspace. Every translator plugin
//! implements [`Translator`]; package discovery, translator loading and
//! onboarding are reached through the traits in [`traits`].

pub mod challenge;
pub mod error;
pub mod operation;
pub mod signature;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use challenge::HubChallenge;
pub use error::HubError;
pub use operation::Operation;
pub use signature::{SignatureAlgorithm, VerificationInfo};
pub use types::{
    AuthInfo, HubDescriptor, HubId, PackageInfo, PlatformBatch, PlatformBlob, PlatformFault,
    SubscriptionResult, TranslatorContext, TranslatorInfo,
};

pub use traits::{Onboarding, OnboardingLoader, PackageSource, Translator, TranslatorLoader};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_collaborator_traits_are_exported() {
        // Fails to compile if a trait goes missing from the public API.
        fn _assert_translator<T: Translator>() {}
        fn _assert_package_source<T: PackageSource>() {}
        fn _assert_translator_loader<T: TranslatorLoader>() {}
        fn _assert_onboarding<T: Onboarding>() {}
        fn _assert_onboarding_loader<T: OnboardingLoader>() {}
    }

    #[test]
    fn translator_context_defaults_empty() {
        let ctx = TranslatorContext::default();
        assert!(ctx.hub.is_none());
        assert!(ctx.auth.is_none());
        assert!(ctx.device.is_none());
    }
}
