// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translator registry, package manifest parser, and built-in hub catalog.
//!
//! Translators are compiled in and registered by a stable string reference
//! at startup. The registry answers package discovery, builds translator
//! instances, and resolves onboarding modules, so no path-based loading
//! happens at runtime.

pub mod catalog;
pub mod manifest;
pub mod registry;

pub use catalog::builtin_hubs;
pub use manifest::parse_package_manifest;
pub use registry::{TranslatorEntry, TranslatorConstructor, TranslatorRegistry};
