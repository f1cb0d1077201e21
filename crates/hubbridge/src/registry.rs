// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hub registry with lazily discovered onboarding metadata.
//!
//! The static hub list is enriched the first time anyone asks for it: each
//! hub's translator package is looked up in declaration order and the first
//! translator of the first package supplies `onboarding` and
//! `onboarding_flow`. The enriched list is cached only when every lookup
//! succeeds. Any failure aborts the walk and leaves the cache empty, so the
//! next call starts over from the first hub.

use std::sync::Arc;

use hubbridge_core::{HubDescriptor, HubError, PackageSource};
use tokio::sync::OnceCell;

/// Static hub list plus the lazily built, enriched cache.
pub struct HubRegistry {
    hubs: Vec<HubDescriptor>,
    packages: Arc<dyn PackageSource>,
    cache: OnceCell<Arc<Vec<HubDescriptor>>>,
}

impl HubRegistry {
    pub fn new(hubs: Vec<HubDescriptor>, packages: Arc<dyn PackageSource>) -> Self {
        Self {
            hubs,
            packages,
            cache: OnceCell::new(),
        }
    }

    /// The enriched hub list.
    ///
    /// Concurrent first callers share one discovery walk. Once populated the
    /// list is returned without touching the package source again.
    pub async fn resolve(&self) -> Result<Arc<Vec<HubDescriptor>>, HubError> {
        self.cache.get_or_try_init(|| self.discover()).await.cloned()
    }

    /// Find the hub whose id matches `hub_id` after string normalization.
    pub async fn lookup(&self, hub_id: &str) -> Result<HubDescriptor, HubError> {
        let hubs = self.resolve().await?;
        match hubs.iter().find(|hub| hub.id.matches(hub_id)) {
            Some(hub) => Ok(hub.clone()),
            None => {
                tracing::error!(hub_id, "invalid hub id");
                Err(HubError::InvalidHubId {
                    hub_id: hub_id.to_string(),
                })
            }
        }
    }

    /// True once a discovery walk has completed successfully.
    pub fn is_cached(&self) -> bool {
        self.cache.initialized()
    }

    async fn discover(&self) -> Result<Arc<Vec<HubDescriptor>>, HubError> {
        tracing::debug!(hubs = self.hubs.len(), "discovering hub packages");

        let mut resolved = Vec::with_capacity(self.hubs.len());
        for (index, declared) in self.hubs.iter().enumerate() {
            let packages = self.packages.package_info(&declared.translator).await?;
            let package = packages.first().ok_or_else(|| HubError::Discovery {
                reference: declared.translator.clone(),
                message: "no packages found".to_string(),
            })?;

            let mut hub = declared.clone();
            match package.translators.first() {
                Some(info) => {
                    tracing::debug!(
                        index,
                        hub_id = %hub.id,
                        package = %package.name,
                        translator = %info.name,
                        "resolved hub package"
                    );
                    hub.enrich(info);
                }
                None => tracing::warn!(
                    index,
                    hub_id = %hub.id,
                    package = %package.name,
                    "package declares no translators, onboarding metadata left unset"
                ),
            }
            resolved.push(hub);
        }

        tracing::info!(hubs = resolved.len(), "hub registry populated");
        Ok(Arc::new(resolved))
    }
}

impl std::fmt::Debug for HubRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubRegistry")
            .field("hubs", &self.hubs)
            .field("cached", &self.is_cached())
            .finish_non_exhaustive()
    }
}
