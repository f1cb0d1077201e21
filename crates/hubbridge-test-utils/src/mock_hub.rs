// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock hub-level translators.
//!
//! `MockHubTranslator` behaves like a cloud hub: it lists a fixed set of
//! lightbulbs, translates provider payloads device by device, refreshes
//! tokens and answers subscription challenges. Every operation it receives
//! is appended to a shared [`HubCallLog`]. `FlakyHubTranslator` fails every
//! call with a transport error.

use std::sync::Arc;

use async_trait::async_trait;
use hubbridge_core::{
    AuthInfo, HubChallenge, HubError, Operation, PlatformBatch, Translator, TranslatorContext,
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::MOCK_PLATFORM_TRANSLATOR;

/// Wire names of the operations a mock hub has received, in order.
pub type HubCallLog = Arc<Mutex<Vec<String>>>;

/// Model name the mock hub knows how to translate.
pub const KNOWN_MODEL: &str = "lightbulb";

/// Hub translator with canned devices and a working refresh flow.
pub struct MockHubTranslator {
    auth: Option<AuthInfo>,
    calls: HubCallLog,
}

impl MockHubTranslator {
    pub fn new(auth: Option<AuthInfo>) -> Self {
        Self::with_call_log(auth, HubCallLog::default())
    }

    /// A mock hub that records every operation into `calls`.
    pub fn with_call_log(auth: Option<AuthInfo>, calls: HubCallLog) -> Self {
        Self { auth, calls }
    }

    /// Construction function for a `TranslatorRegistry` whose instances share
    /// `calls`.
    pub fn logging_factory(
        calls: HubCallLog,
    ) -> impl Fn(TranslatorContext) -> Result<Arc<dyn Translator>, HubError> + Send + Sync {
        move |context| Ok(Arc::new(Self::with_call_log(context.auth, calls.clone())))
    }

    /// Provider payload the mock hub reports when listing platforms.
    pub fn devices() -> Value {
        json!([
            { "id": "bulb-1", "name": "Porch", "model_name": KNOWN_MODEL },
            { "id": "bulb-2", "name": "Hallway", "model_name": KNOWN_MODEL },
        ])
    }

    fn token(&self) -> Result<&str, HubError> {
        self.auth
            .as_ref()
            .and_then(|auth| auth.as_value().pointer("/access/token"))
            .and_then(Value::as_str)
            .ok_or(HubError::InvalidAuthInfoInput)
    }

    fn platforms(&self, args: &[Value]) -> Result<Value, HubError> {
        self.token()?;
        let payload = args.get(1).cloned().unwrap_or_else(Self::devices);
        let items = match payload {
            Value::Array(items) => items,
            single => vec![single],
        };
        let batch = PlatformBatch::collect(items, |item| translate_device(&item));
        Ok(serde_json::to_value(batch)?)
    }

    fn refresh(&self, args: &[Value]) -> Result<Value, HubError> {
        let token = self.token()?;
        let client_id = args
            .first()
            .and_then(|info| info.get("client_id"))
            .and_then(Value::as_str)
            .ok_or(HubError::InvalidAuthInfoInput)?;
        tracing::debug!(client_id, "refreshing mock hub token");
        Ok(json!({
            "access": { "token": format!("{token}-refreshed"), "client_id": client_id }
        }))
    }

    fn answer_challenge(&self, args: &[Value]) -> Result<Value, HubError> {
        let url = args
            .first()
            .and_then(|arg| arg.pointer("/verificationRequest/url"))
            .and_then(Value::as_str)
            .ok_or_else(|| HubError::translator("hub subscriptions need a verification request"))?;
        let response = HubChallenge::from_url(url)?.into_response();
        Ok(serde_json::to_value(response)?)
    }
}

#[async_trait]
impl Translator for MockHubTranslator {
    fn name(&self) -> &str {
        "mock-hub"
    }

    async fn invoke(&self, operation: &Operation, args: Vec<Value>) -> Result<Value, HubError> {
        self.calls.lock().await.push(operation.name());
        match operation {
            Operation::GetPlatforms => self.platforms(&args),
            Operation::RefreshAuthToken => self.refresh(&args),
            Operation::PostSubscribe => self.answer_challenge(&args),
            other => Err(other.unsupported_by(self.name())),
        }
    }
}

fn translate_device(item: &Value) -> Result<Value, HubError> {
    let model = item
        .get("model_name")
        .and_then(Value::as_str)
        .ok_or_else(|| HubError::translator("device is missing model_name"))?;
    if model != KNOWN_MODEL {
        return Err(HubError::UnknownPlatform {
            model: model.to_string(),
        });
    }
    Ok(json!({
        "translator": MOCK_PLATFORM_TRANSLATOR,
        "controlId": item.get("id").cloned().unwrap_or(Value::Null),
        "name": item.get("name").cloned().unwrap_or(Value::Null),
        "model": model,
    }))
}

/// Hub translator whose upstream is always unavailable.
pub struct FlakyHubTranslator;

impl FlakyHubTranslator {
    pub fn factory(_context: TranslatorContext) -> Result<Arc<dyn Translator>, HubError> {
        Ok(Arc::new(FlakyHubTranslator))
    }
}

#[async_trait]
impl Translator for FlakyHubTranslator {
    fn name(&self) -> &str {
        "flaky-hub"
    }

    async fn invoke(&self, _operation: &Operation, _args: Vec<Value>) -> Result<Value, HubError> {
        Err(HubError::Transport {
            status: 503,
            status_message: "Service Unavailable".to_string(),
        })
    }
}
