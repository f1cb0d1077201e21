// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Onboarding modules performing provider login/OAuth flows.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HubError;
use crate::types::AuthInfo;

/// A provider-specific login flow.
#[async_trait]
pub trait Onboarding: Send + Sync {
    /// Runs the flow with caller-supplied onboarding info and returns the
    /// resulting credentials.
    async fn onboard(&self, onboarding_info: Value) -> Result<AuthInfo, HubError>;
}

/// Resolves onboarding references to onboarding modules.
#[async_trait]
pub trait OnboardingLoader: Send + Sync {
    async fn onboarding(&self, onboarding_ref: &str) -> Result<Arc<dyn Onboarding>, HubError>;
}
