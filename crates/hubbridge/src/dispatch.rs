// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic operation dispatch onto translators.
//!
//! A dispatch target is either a live translator or a reference the
//! [`TranslatorFactory`] can build one from. Operation names are parsed into
//! [`Operation`] before anything is instantiated, so a typo fails fast with
//! `UnsupportedOperation`.

use std::sync::Arc;

use hubbridge_core::{HubError, Operation, Translator, TranslatorContext};
use serde_json::Value;

use crate::factory::TranslatorFactory;

/// What to dispatch an operation onto.
#[derive(Clone)]
pub enum TranslatorTarget {
    /// An already constructed translator. The context is ignored.
    Instance(Arc<dyn Translator>),
    /// A translator reference, instantiated with the supplied context.
    Reference(String),
}

impl From<Arc<dyn Translator>> for TranslatorTarget {
    fn from(translator: Arc<dyn Translator>) -> Self {
        TranslatorTarget::Instance(translator)
    }
}

impl From<&str> for TranslatorTarget {
    fn from(reference: &str) -> Self {
        TranslatorTarget::Reference(reference.to_string())
    }
}

impl From<String> for TranslatorTarget {
    fn from(reference: String) -> Self {
        TranslatorTarget::Reference(reference)
    }
}

impl std::fmt::Debug for TranslatorTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslatorTarget::Instance(t) => f.debug_tuple("Instance").field(&t.name()).finish(),
            TranslatorTarget::Reference(r) => f.debug_tuple("Reference").field(r).finish(),
        }
    }
}

/// Resolves targets and invokes named operations on them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    factory: TranslatorFactory,
}

impl Dispatcher {
    pub fn new(factory: TranslatorFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &TranslatorFactory {
        &self.factory
    }

    /// Invoke the operation called `operation` on `target`.
    pub async fn invoke(
        &self,
        target: impl Into<TranslatorTarget>,
        context: TranslatorContext,
        operation: &str,
        args: Vec<Value>,
    ) -> Result<Value, HubError> {
        let operation = Operation::parse(operation)?;
        self.invoke_operation(target.into(), context, &operation, args).await
    }

    /// Invoke an already parsed operation on `target`.
    pub async fn invoke_operation(
        &self,
        target: TranslatorTarget,
        context: TranslatorContext,
        operation: &Operation,
        args: Vec<Value>,
    ) -> Result<Value, HubError> {
        tracing::info!(operation = %operation, target = ?target, "invoking translator");
        tracing::trace!(operation = %operation, ?args, "translator arguments");

        let translator = match target {
            TranslatorTarget::Instance(translator) => translator,
            TranslatorTarget::Reference(reference) => {
                self.factory.create(&reference, context).await?
            }
        };
        translator.invoke(operation, args).await
    }

    /// Set `resource_id` on `device_id` through a platform translator.
    ///
    /// Dispatches `postDevices<ResourceId>` with `[device_id, value]`.
    pub async fn set_property(
        &self,
        translator_ref: &str,
        context: TranslatorContext,
        device_id: &str,
        resource_id: &str,
        value: Value,
    ) -> Result<Value, HubError> {
        let operation = Operation::set_resource(resource_id);
        self.invoke_operation(
            TranslatorTarget::Reference(translator_ref.to_string()),
            context,
            &operation,
            vec![Value::String(device_id.to_string()), value],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hubbridge_core::TranslatorLoader;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recorder;

    #[async_trait]
    impl Translator for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn invoke(&self, operation: &Operation, args: Vec<Value>) -> Result<Value, HubError> {
            Ok(json!({ "operation": operation.name(), "args": args }))
        }
    }

    #[derive(Default)]
    struct CountingLoader {
        created: AtomicUsize,
    }

    #[async_trait]
    impl TranslatorLoader for CountingLoader {
        async fn create_translator(
            &self,
            translator_ref: &str,
            _context: TranslatorContext,
        ) -> Result<Arc<dyn Translator>, HubError> {
            if translator_ref != "recorder" {
                return Err(HubError::TranslatorNotFound {
                    reference: translator_ref.to_string(),
                });
            }
            self.created.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Recorder))
        }
    }

    fn dispatcher(loader: Arc<CountingLoader>) -> Dispatcher {
        Dispatcher::new(TranslatorFactory::new(loader))
    }

    #[tokio::test]
    async fn set_property_builds_capitalized_operation_name() {
        let dispatcher = dispatcher(Arc::new(CountingLoader::default()));
        let result = dispatcher
            .set_property(
                "recorder",
                TranslatorContext::default(),
                "dev-1",
                "brightness",
                json!(50),
            )
            .await
            .unwrap();
        assert_eq!(result["operation"], "postDevicesBrightness");
        assert_eq!(result["args"], json!(["dev-1", 50]));
    }

    #[tokio::test]
    async fn set_property_with_empty_resource_uses_bare_prefix() {
        let dispatcher = dispatcher(Arc::new(CountingLoader::default()));
        let result = dispatcher
            .set_property("recorder", TranslatorContext::default(), "dev-1", "", json!(true))
            .await
            .unwrap();
        assert_eq!(result["operation"], "postDevices");
    }

    #[tokio::test]
    async fn instance_targets_are_not_reinstantiated() {
        let loader = Arc::new(CountingLoader::default());
        let dispatcher = dispatcher(loader.clone());
        let instance: Arc<dyn Translator> = Arc::new(Recorder);

        dispatcher
            .invoke(instance, TranslatorContext::default(), "getPlatforms", vec![json!(true)])
            .await
            .unwrap();
        assert_eq!(loader.created.load(Ordering::SeqCst), 0);

        dispatcher
            .invoke("recorder", TranslatorContext::default(), "get", vec![])
            .await
            .unwrap();
        assert_eq!(loader.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_operation_fails_before_instantiation() {
        let loader = Arc::new(CountingLoader::default());
        let dispatcher = dispatcher(loader.clone());
        let err = dispatcher
            .invoke("recorder", TranslatorContext::default(), "explode", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::UnsupportedOperation { .. }));
        assert_eq!(loader.created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_reference_is_translator_not_found() {
        let dispatcher = dispatcher(Arc::new(CountingLoader::default()));
        let err = dispatcher
            .invoke("missing", TranslatorContext::default(), "get", vec![])
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }
}
