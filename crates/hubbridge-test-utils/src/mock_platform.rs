// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock platform-level translator for a single lightbulb.
//!
//! Resource writes echo back the wire operation name they arrived under, so
//! tests can assert on `postDevices<Resource>` naming directly.

use std::sync::Arc;

use async_trait::async_trait;
use hubbridge_core::{
    HubError, Operation, PlatformBlob, SubscriptionResult, Translator, TranslatorContext,
};
use serde_json::{Value, json};

/// Lease granted when a subscription does not ask for one.
pub const DEFAULT_LEASE_SECONDS: u64 = 86_400;

/// Platform translator reached through a parent hub translator.
pub struct MockPlatformTranslator {
    hub: Arc<dyn Translator>,
    device: PlatformBlob,
}

impl MockPlatformTranslator {
    /// Construction function for a `TranslatorRegistry`.
    ///
    /// Fails unless the context carries both a hub and a platform blob.
    pub fn factory(context: TranslatorContext) -> Result<Arc<dyn Translator>, HubError> {
        let hub = context
            .hub
            .ok_or_else(|| HubError::translator("platform translator needs a parent hub"))?;
        let device = context
            .device
            .ok_or_else(|| HubError::translator("platform translator needs a platform blob"))?;
        Ok(Arc::new(Self { hub, device }))
    }

    fn control_id(&self) -> Value {
        self.device.fields.get("controlId").cloned().unwrap_or(Value::Null)
    }
}

#[async_trait]
impl Translator for MockPlatformTranslator {
    fn name(&self) -> &str {
        "mock-lightbulb"
    }

    async fn invoke(&self, operation: &Operation, args: Vec<Value>) -> Result<Value, HubError> {
        match operation {
            Operation::Get => Ok(json!({
                "controlId": self.control_id(),
                "hub": self.hub.name(),
                "entities": [
                    { "resources": [ { "id": "power", "value": "on" } ] }
                ],
            })),
            Operation::PostDevices { resource } => {
                let mut args = args.into_iter();
                Ok(json!({
                    "operation": operation.name(),
                    "resource": resource,
                    "deviceId": args.next().unwrap_or(Value::Null),
                    "value": args.next().unwrap_or(Value::Null),
                }))
            }
            Operation::PostSubscribe => {
                let lease = args
                    .first()
                    .and_then(|info| info.get("lease_seconds"))
                    .and_then(Value::as_u64)
                    .unwrap_or(DEFAULT_LEASE_SECONDS);
                Ok(serde_json::to_value(SubscriptionResult {
                    response: None,
                    expiration: lease,
                })?)
            }
            Operation::DeleteSubscribe => Ok(serde_json::to_value(SubscriptionResult::default())?),
            other => Err(other.unsupported_by(self.name())),
        }
    }
}
