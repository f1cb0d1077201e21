// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package source wrapper that records lookups and injects failures.

use std::sync::Arc;

use async_trait::async_trait;
use hubbridge_core::{HubError, PackageInfo, PackageSource};
use tokio::sync::Mutex;

/// Forwards to an inner [`PackageSource`], logging every translator
/// reference it is asked about.
pub struct CountingPackageSource {
    inner: Arc<dyn PackageSource>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<Option<String>>,
}

impl CountingPackageSource {
    pub fn new(inner: Arc<dyn PackageSource>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(None),
        }
    }

    /// Make lookups for `translator_ref` fail until [`recover`](Self::recover).
    pub async fn fail_on(&self, translator_ref: impl Into<String>) {
        *self.failing.lock().await = Some(translator_ref.into());
    }

    pub async fn recover(&self) {
        *self.failing.lock().await = None;
    }

    /// Translator references looked up so far, in order.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl PackageSource for CountingPackageSource {
    async fn package_info(&self, translator_ref: &str) -> Result<Vec<PackageInfo>, HubError> {
        self.calls.lock().await.push(translator_ref.to_string());
        if self.failing.lock().await.as_deref() == Some(translator_ref) {
            return Err(HubError::Discovery {
                reference: translator_ref.to_string(),
                message: "injected failure".to_string(),
            });
        }
        self.inner.package_info(translator_ref).await
    }
}
