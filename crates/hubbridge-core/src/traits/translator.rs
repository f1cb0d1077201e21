// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translator trait implemented by every hub and platform plugin.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HubError;
use crate::operation::Operation;

/// A live translator instance for one hub or platform.
///
/// Instances are created per call and may hold call-specific credentials,
/// so they are never cached across unrelated requests.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Returns the name of the translator (its registration reference).
    fn name(&self) -> &str;

    /// Runs `operation` with positional arguments.
    ///
    /// Operations the translator does not implement must fail with
    /// [`HubError::UnsupportedOperation`] (see [`Operation::unsupported_by`]).
    async fn invoke(&self, operation: &Operation, args: Vec<Value>) -> Result<Value, HubError>;
}
