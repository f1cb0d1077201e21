// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package discovery and translator instantiation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::HubError;
use crate::traits::translator::Translator;
use crate::types::{PackageInfo, TranslatorContext};

/// Resolves a translator reference to the packages that provide it.
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Returns package metadata for `translator_ref`.
    ///
    /// An unknown reference or an empty result must be reported as an error.
    async fn package_info(&self, translator_ref: &str) -> Result<Vec<PackageInfo>, HubError>;
}

/// Builds translator instances from a reference and a construction context.
#[async_trait]
pub trait TranslatorLoader: Send + Sync {
    /// Creates a fresh translator. The context is passed through unchanged.
    async fn create_translator(
        &self,
        translator_ref: &str,
        context: TranslatorContext,
    ) -> Result<Arc<dyn Translator>, HubError>;
}
