// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translator instantiation.
//!
//! Every call builds a fresh translator from its reference and context.
//! Instances are never cached; they live for one dispatch.

use std::sync::Arc;

use hubbridge_core::{
    AuthInfo, HubDescriptor, HubError, Translator, TranslatorContext, TranslatorLoader,
};

/// Creates translator instances through a [`TranslatorLoader`].
#[derive(Clone)]
pub struct TranslatorFactory {
    loader: Arc<dyn TranslatorLoader>,
}

impl TranslatorFactory {
    pub fn new(loader: Arc<dyn TranslatorLoader>) -> Self {
        Self { loader }
    }

    /// Build a translator for `translator_ref` with the given context.
    pub async fn create(
        &self,
        translator_ref: &str,
        context: TranslatorContext,
    ) -> Result<Arc<dyn Translator>, HubError> {
        tracing::debug!(translator = translator_ref, "creating translator");
        self.loader.create_translator(translator_ref, context).await
    }

    /// Build the hub-level translator for `hub` using caller credentials.
    pub async fn create_hub(
        &self,
        hub: &HubDescriptor,
        auth: &AuthInfo,
    ) -> Result<Arc<dyn Translator>, HubError> {
        self.create(&hub.translator, TranslatorContext::for_hub(auth)).await
    }
}

impl std::fmt::Debug for TranslatorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorFactory").finish_non_exhaustive()
    }
}
