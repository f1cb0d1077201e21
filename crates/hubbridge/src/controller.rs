// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public hub operations.
//!
//! Each operation resolves the hub through the [`HubRegistry`], builds the
//! translators it needs through the [`TranslatorFactory`], dispatches one
//! named operation and normalizes any failure. Every call runs inside a
//! `hub_operation` span tagged with the operation, hub id and the current
//! correlation vector.

use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use hubbridge_config::HubbridgeConfig;
use hubbridge_core::{
    AuthInfo, HubDescriptor, HubError, OnboardingLoader, Operation, PackageSource, PlatformBatch,
    PlatformBlob, SubscriptionResult, Translator, TranslatorContext, TranslatorLoader,
    VerificationInfo,
};
use hubbridge_plugin::TranslatorRegistry;
use serde_json::Value;
use tracing::Instrument;

use crate::dispatch::{Dispatcher, TranslatorTarget};
use crate::factory::TranslatorFactory;
use crate::normalize::{NormalizedError, normalize};
use crate::registry::HubRegistry;
use crate::telemetry::LogHandle;
use crate::verification::{self, SignatureSettings};

/// Entry point for callers managing hubs through translators.
pub struct HubController {
    registry: HubRegistry,
    dispatcher: Dispatcher,
    onboardings: Arc<dyn OnboardingLoader>,
    signatures: SignatureSettings,
    correlation_vector: ArcSwapOption<String>,
    log: Option<LogHandle>,
}

impl HubController {
    pub fn new(
        hubs: Vec<HubDescriptor>,
        packages: Arc<dyn PackageSource>,
        translators: Arc<dyn TranslatorLoader>,
        onboardings: Arc<dyn OnboardingLoader>,
    ) -> Self {
        Self {
            registry: HubRegistry::new(hubs, packages),
            dispatcher: Dispatcher::new(TranslatorFactory::new(translators)),
            onboardings,
            signatures: SignatureSettings::default(),
            correlation_vector: ArcSwapOption::empty(),
            log: None,
        }
    }

    /// Controller over the configured hubs, backed by one translator registry.
    pub fn from_config(config: &HubbridgeConfig, translators: Arc<TranslatorRegistry>) -> Self {
        Self::new(
            config.hub_descriptors(),
            translators.clone(),
            translators.clone(),
            translators,
        )
        .with_signature_settings(SignatureSettings::from(&config.verification))
    }

    pub fn with_signature_settings(mut self, settings: SignatureSettings) -> Self {
        self.signatures = settings;
        self
    }

    /// Attach the handle returned by [`crate::telemetry::init_tracing`].
    pub fn with_log_handle(mut self, handle: LogHandle) -> Self {
        self.log = Some(handle);
        self
    }

    pub fn registry(&self) -> &HubRegistry {
        &self.registry
    }

    pub fn correlation_vector(&self) -> Option<String> {
        self.correlation_vector.load_full().map(|cv| cv.as_ref().clone())
    }

    /// Tag subsequent operations with `cv`.
    pub fn set_correlation_vector(&self, cv: impl Into<String>) {
        self.correlation_vector.store(Some(Arc::new(cv.into())));
    }

    pub fn clear_correlation_vector(&self) {
        self.correlation_vector.store(None);
    }

    /// Current log level, if a log handle is attached.
    pub fn log_level(&self) -> Option<String> {
        self.log.as_ref().map(LogHandle::level)
    }

    pub fn set_log_level(&self, level: &str) -> Result<(), NormalizedError> {
        let result = match &self.log {
            Some(handle) => handle.set_level(level),
            None => Err(HubError::Config("no log handle attached".to_string())),
        };
        result.map_err(|e| normalize(e, "setLogLevel"))
    }

    /// The enriched hub list.
    pub async fn list_supported_hubs(&self) -> Result<Arc<Vec<HubDescriptor>>, NormalizedError> {
        self.run("listSupportedHubs", None, self.registry.resolve()).await
    }

    /// Run the hub's onboarding module and return the resulting credentials.
    pub async fn onboard(
        &self,
        hub_id: &str,
        onboarding_info: Value,
    ) -> Result<AuthInfo, NormalizedError> {
        self.run("onboard", Some(hub_id), async {
            let hub = self.registry.lookup(hub_id).await?;
            require_input(&onboarding_info)?;
            let reference = hub.onboarding.ok_or_else(|| HubError::OnboardingNotFound {
                reference: format!("<none declared by hub {}>", hub.id),
            })?;
            let onboarding = self.onboardings.onboarding(&reference).await?;
            onboarding.onboard(onboarding_info).await
        })
        .await
    }

    /// Exchange `auth` for fresh credentials through the hub translator.
    pub async fn refresh_auth_token(
        &self,
        hub_id: &str,
        onboarding_info: Value,
        auth: &AuthInfo,
    ) -> Result<AuthInfo, NormalizedError> {
        self.run("refreshAuthToken", Some(hub_id), async {
            let hub = self.registry.lookup(hub_id).await?;
            require_input(&onboarding_info)?;
            require_input(auth.as_value())?;
            let refreshed = self
                .invoke_hub(&hub, auth, Operation::RefreshAuthToken, vec![onboarding_info])
                .await?;
            Ok(AuthInfo::new(refreshed))
        })
        .await
    }

    /// All platforms the hub exposes to `auth`.
    pub async fn list_platforms(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
    ) -> Result<PlatformBatch, NormalizedError> {
        self.run("listPlatforms", Some(hub_id), async {
            let hub = self.registry.lookup(hub_id).await?;
            let result = self
                .invoke_hub(&hub, auth, Operation::GetPlatforms, vec![Value::Bool(true)])
                .await?;
            platform_batch(result)
        })
        .await
    }

    /// Current state of one platform.
    pub async fn get_platform(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        platform: &PlatformBlob,
    ) -> Result<Value, NormalizedError> {
        self.run("getPlatform", Some(hub_id), async {
            let context = self.device_context(hub_id, auth, platform).await?;
            self.invoke_platform(platform, context, Operation::Get, vec![Value::Bool(true)])
                .await
        })
        .await
    }

    /// Set `resource_id` to `value` on `device_id`.
    pub async fn set_resource(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        platform: &PlatformBlob,
        device_id: &str,
        resource_id: &str,
        value: Value,
    ) -> Result<Value, NormalizedError> {
        self.run("setResource", Some(hub_id), async {
            let context = self.device_context(hub_id, auth, platform).await?;
            self.dispatcher
                .set_property(&platform.translator, context, device_id, resource_id, value)
                .await
        })
        .await
    }

    /// Subscribe to change notifications for one platform.
    pub async fn subscribe_platform(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        platform: &PlatformBlob,
        subscription_info: Value,
    ) -> Result<SubscriptionResult, NormalizedError> {
        self.run("subscribePlatform", Some(hub_id), async {
            let context = self.device_context(hub_id, auth, platform).await?;
            let result = self
                .invoke_platform(
                    platform,
                    context,
                    Operation::PostSubscribe,
                    verification::subscription_args(subscription_info),
                )
                .await?;
            verification::subscription_result(result)
        })
        .await
    }

    /// Remove a platform subscription.
    pub async fn unsubscribe_platform(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        platform: &PlatformBlob,
        subscription_info: Value,
    ) -> Result<SubscriptionResult, NormalizedError> {
        self.run("unsubscribePlatform", Some(hub_id), async {
            let context = self.device_context(hub_id, auth, platform).await?;
            let result = self
                .invoke_platform(
                    platform,
                    context,
                    Operation::DeleteSubscribe,
                    verification::subscription_args(subscription_info),
                )
                .await?;
            verification::subscription_result(result)
        })
        .await
    }

    /// Answer a provider's subscription verification request.
    ///
    /// Goes to the hub-level translator, since challenges arrive before any
    /// platform subscription exists.
    pub async fn verify_subscription(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        verification_request: Value,
    ) -> Result<SubscriptionResult, NormalizedError> {
        self.run("verifySubscription", Some(hub_id), async {
            let hub = self.registry.lookup(hub_id).await?;
            let result = self
                .invoke_hub(
                    &hub,
                    auth,
                    Operation::PostSubscribe,
                    verification::verification_args(verification_request),
                )
                .await?;
            verification::subscription_result(result)
        })
        .await
    }

    /// Translate an inbound provider notification into platforms.
    ///
    /// When `verification` carries a key, the payload signature is checked
    /// first and a mismatch rejects the whole batch. Platforms the translator
    /// cannot recognize come back in `errors` without failing the call.
    pub async fn translate_platforms(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        provider_payload: Value,
        verification: Option<&VerificationInfo>,
    ) -> Result<PlatformBatch, NormalizedError> {
        self.run("translatePlatforms", Some(hub_id), async {
            let hub = self.registry.lookup(hub_id).await?;
            if let Some(info) = verification {
                verification::verify_payload(&self.signatures, info, &provider_payload)?;
            }
            let args = verification::translation_args(provider_payload, verification)?;
            let result = self.invoke_hub(&hub, auth, Operation::GetPlatforms, args).await?;
            let batch = platform_batch(result)?;
            if batch.is_partial() {
                tracing::warn!(
                    translated = batch.platforms.len(),
                    failed = batch.errors.len(),
                    "provider payload partially translated"
                );
            }
            Ok(batch)
        })
        .await
    }

    async fn run<T, F>(
        &self,
        label: &'static str,
        hub_id: Option<&str>,
        operation: F,
    ) -> Result<T, NormalizedError>
    where
        F: Future<Output = Result<T, HubError>>,
    {
        let span = tracing::info_span!(
            "hub_operation",
            operation = label,
            hub_id = hub_id.unwrap_or("-"),
            correlation_vector = %self.correlation_vector().unwrap_or_default(),
        );
        async move { operation.await.map_err(|e| normalize(e, label)) }
            .instrument(span)
            .await
    }

    async fn invoke_hub(
        &self,
        hub: &HubDescriptor,
        auth: &AuthInfo,
        operation: Operation,
        args: Vec<Value>,
    ) -> Result<Value, HubError> {
        self.dispatcher
            .invoke_operation(
                TranslatorTarget::Reference(hub.translator.clone()),
                TranslatorContext::for_hub(auth),
                &operation,
                args,
            )
            .await
    }

    async fn invoke_platform(
        &self,
        platform: &PlatformBlob,
        context: TranslatorContext,
        operation: Operation,
        args: Vec<Value>,
    ) -> Result<Value, HubError> {
        self.dispatcher
            .invoke_operation(
                TranslatorTarget::Reference(platform.translator.clone()),
                context,
                &operation,
                args,
            )
            .await
    }

    /// Build the hub translator and the context a platform translator needs.
    async fn device_context(
        &self,
        hub_id: &str,
        auth: &AuthInfo,
        platform: &PlatformBlob,
    ) -> Result<TranslatorContext, HubError> {
        let hub = self.registry.lookup(hub_id).await?;
        let hub_translator: Arc<dyn Translator> =
            self.dispatcher.factory().create_hub(&hub, auth).await?;
        Ok(TranslatorContext::for_device(hub_translator, platform))
    }
}

impl std::fmt::Debug for HubController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubController")
            .field("registry", &self.registry)
            .field("signatures", &self.signatures)
            .field("correlation_vector", &self.correlation_vector())
            .finish_non_exhaustive()
    }
}

/// Onboarding and auth input must be a JSON object or array.
fn require_input(value: &Value) -> Result<(), HubError> {
    match value {
        Value::Object(_) | Value::Array(_) => Ok(()),
        _ => Err(HubError::InvalidAuthInfoInput),
    }
}

/// A translator may return a batch object or a bare platform array.
fn platform_batch(value: Value) -> Result<PlatformBatch, HubError> {
    match value {
        Value::Array(platforms) => Ok(PlatformBatch {
            platforms,
            errors: Vec::new(),
        }),
        other => Ok(serde_json::from_value(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubbridge_core::{PackageInfo, TranslatorInfo};
    use serde_json::json;
    use tracing_test::traced_test;

    fn controller() -> HubController {
        let mut translators = TranslatorRegistry::new();
        translators.register_translator(
            "translator-known",
            vec![PackageInfo {
                name: "translator-known".to_string(),
                version: "1.0.0".to_string(),
                translators: vec![TranslatorInfo {
                    name: "known".to_string(),
                    onboarding: None,
                    onboarding_flow: None,
                }],
            }],
            |_context: TranslatorContext| -> Result<Arc<dyn Translator>, HubError> {
                Err(HubError::translator("not constructible here"))
            },
        );
        let translators = Arc::new(translators);
        HubController::new(
            vec![HubDescriptor::new("known", "Known Hub", "translator-known")],
            translators.clone(),
            translators.clone(),
            translators,
        )
    }

    #[tokio::test]
    #[traced_test]
    async fn operations_run_in_a_span_tagged_with_the_correlation_vector() {
        let controller = controller();
        controller.set_correlation_vector("cv.1.2");

        let err = controller
            .onboard("NonExistentHub", Value::Null)
            .await
            .unwrap_err();
        assert_eq!(err.status_code, 404);

        assert!(logs_contain("hub_operation"));
        assert!(logs_contain("correlation_vector=cv.1.2"));
        assert!(logs_contain("onboard"));
        assert!(logs_contain("NonExistentHub"));
    }

    #[tokio::test]
    async fn hub_is_resolved_before_input_is_checked() {
        let controller = controller();
        let err = controller
            .refresh_auth_token("NonExistentHub", json!("undefined"), &AuthInfo::new(Value::Null))
            .await
            .unwrap_err();
        assert!(matches!(err.inner, HubError::InvalidHubId { .. }));

        let err = controller
            .refresh_auth_token("known", json!("undefined"), &AuthInfo::new(Value::Null))
            .await
            .unwrap_err();
        assert!(matches!(err.inner, HubError::InvalidAuthInfoInput));
    }

    #[test]
    fn require_input_rejects_scalars_and_null() {
        assert!(require_input(&json!({ "k": 1 })).is_ok());
        assert!(require_input(&json!([])).is_ok());
        for bad in [Value::Null, json!("undefined"), json!(3)] {
            assert!(matches!(require_input(&bad), Err(HubError::InvalidAuthInfoInput)));
        }
    }

    #[test]
    fn platform_batch_accepts_bare_arrays() {
        let batch = platform_batch(json!([{ "id": 1 }])).unwrap();
        assert_eq!(batch.platforms.len(), 1);
        assert!(!batch.is_partial());

        let batch = platform_batch(json!({
            "platforms": [],
            "errors": [{ "status_code": 404, "message": "UnknownPlatform: x" }]
        }))
        .unwrap();
        assert!(batch.is_partial());
    }
}
