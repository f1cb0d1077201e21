// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscription payloads and inbound webhook verification.
//!
//! Subscribe and unsubscribe pass the caller's subscription info straight to
//! the platform translator. Verification requests are wrapped as
//! `{ "verificationRequest": ... }` for the hub translator. Inbound webhook
//! payloads are checked against an HMAC signature before any translator
//! sees them.

use std::borrow::Cow;

use hubbridge_config::model::VerificationConfig;
use hubbridge_core::signature::{self, DEFAULT_SIGNATURE_HEADER};
use hubbridge_core::{HubError, SignatureAlgorithm, SubscriptionResult, VerificationInfo};
use serde_json::{Value, json};

/// Header and default algorithm used to check inbound signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSettings {
    pub header: String,
    pub algorithm: SignatureAlgorithm,
}

impl Default for SignatureSettings {
    fn default() -> Self {
        Self {
            header: DEFAULT_SIGNATURE_HEADER.to_string(),
            algorithm: SignatureAlgorithm::default(),
        }
    }
}

impl From<&VerificationConfig> for SignatureSettings {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            header: config.signature_header.clone(),
            algorithm: config.algorithm,
        }
    }
}

/// Outcome of an inbound signature check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The signature matched.
    Verified,
    /// No key was supplied, so there was nothing to check against.
    Skipped,
}

/// Check the signature carried in `info` against `payload`.
///
/// The MAC covers `info.raw_body` when present, otherwise the compact JSON
/// encoding of `payload`. A key without a signature header is rejected.
pub fn verify_payload(
    settings: &SignatureSettings,
    info: &VerificationInfo,
    payload: &Value,
) -> Result<Verification, HubError> {
    let Some(key) = info.key.as_deref() else {
        tracing::debug!("no verification key supplied, skipping signature check");
        return Ok(Verification::Skipped);
    };

    let Some(provided) = info.signature(&settings.header) else {
        tracing::warn!(header = %settings.header, "signature header missing from inbound payload");
        return Err(HubError::SignatureVerificationFailed);
    };

    let algorithm = info.algorithm.unwrap_or(settings.algorithm);
    let body: Cow<'_, [u8]> = match &info.raw_body {
        Some(raw) => Cow::Borrowed(raw.as_slice()),
        None => Cow::Owned(serde_json::to_vec(payload)?),
    };

    match signature::verify_signature(algorithm, key.as_bytes(), &body, provided) {
        Ok(()) => {
            tracing::debug!(%algorithm, "inbound signature verified");
            Ok(Verification::Verified)
        }
        Err(err) => {
            tracing::warn!(%algorithm, "inbound signature mismatch");
            Err(err)
        }
    }
}

/// Arguments for `postSubscribe` and `deleteSubscribe` on a platform translator.
pub fn subscription_args(subscription_info: Value) -> Vec<Value> {
    vec![subscription_info]
}

/// Arguments for the hub translator's `postSubscribe` when answering a
/// provider verification request.
pub fn verification_args(verification_request: Value) -> Vec<Value> {
    vec![json!({ "verificationRequest": verification_request })]
}

/// Arguments for `getPlatforms` when translating a provider payload.
pub fn translation_args(
    provider_payload: Value,
    info: Option<&VerificationInfo>,
) -> Result<Vec<Value>, HubError> {
    let info = match info {
        Some(info) => serde_json::to_value(info)?,
        None => Value::Null,
    };
    Ok(vec![Value::Bool(true), provider_payload, info])
}

/// Read a subscription result returned by a translator.
///
/// A bare string is taken as the response body with no expiration.
pub fn subscription_result(value: Value) -> Result<SubscriptionResult, HubError> {
    match value {
        Value::String(response) => Ok(SubscriptionResult {
            response: Some(response),
            expiration: 0,
        }),
        Value::Null => Ok(SubscriptionResult::default()),
        other => Ok(serde_json::from_value(other)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed(payload: &Value, key: &str) -> VerificationInfo {
        let body = serde_json::to_vec(payload).unwrap();
        let sig = signature::compute_signature(SignatureAlgorithm::Sha1, key.as_bytes(), &body)
            .unwrap();
        VerificationInfo::new(key).with_header(DEFAULT_SIGNATURE_HEADER, sig)
    }

    #[test]
    fn matching_signature_verifies() {
        let payload = json!({ "object_type": "light_bulb", "name": "Porch" });
        let info = signed(&payload, "s3cret");
        let outcome = verify_payload(&SignatureSettings::default(), &info, &payload).unwrap();
        assert_eq!(outcome, Verification::Verified);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let payload = json!({ "a": 1 });
        let body = serde_json::to_vec(&payload).unwrap();
        let sig = signature::compute_signature(SignatureAlgorithm::Sha1, b"k", &body).unwrap();
        let info = VerificationInfo::new("k").with_header("x-hub-signature", format!("sha1={sig}"));
        assert!(verify_payload(&SignatureSettings::default(), &info, &payload).is_ok());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let payload = json!({ "name": "Porch" });
        let info = signed(&payload, "s3cret");
        let tampered = json!({ "name": "Garage" });
        let err = verify_payload(&SignatureSettings::default(), &info, &tampered).unwrap_err();
        assert!(matches!(err, HubError::SignatureVerificationFailed));
    }

    #[test]
    fn raw_body_takes_precedence_over_payload() {
        let raw = br#"{"name":  "Porch"}"#.to_vec();
        let sig = signature::compute_signature(SignatureAlgorithm::Sha1, b"k", &raw).unwrap();
        let info = VerificationInfo::new("k")
            .with_header(DEFAULT_SIGNATURE_HEADER, sig)
            .with_raw_body(raw);
        let outcome =
            verify_payload(&SignatureSettings::default(), &info, &json!({ "ignored": true }))
                .unwrap();
        assert_eq!(outcome, Verification::Verified);
    }

    #[test]
    fn configured_header_and_algorithm_are_used() {
        let settings = SignatureSettings {
            header: "X-Signature".to_string(),
            algorithm: SignatureAlgorithm::Sha256,
        };
        let payload = json!({ "n": 1 });
        let body = serde_json::to_vec(&payload).unwrap();
        let sig = signature::compute_signature(SignatureAlgorithm::Sha256, b"k", &body).unwrap();

        let info = VerificationInfo::new("k").with_header("X-Signature", sig.clone());
        assert!(verify_payload(&settings, &info, &payload).is_ok());

        let wrong_header = VerificationInfo::new("k").with_header(DEFAULT_SIGNATURE_HEADER, sig);
        assert!(verify_payload(&settings, &wrong_header, &payload).is_err());
    }

    #[test]
    fn missing_key_skips_and_missing_signature_rejects() {
        let payload = json!({});
        let unkeyed = VerificationInfo::default();
        assert_eq!(
            verify_payload(&SignatureSettings::default(), &unkeyed, &payload).unwrap(),
            Verification::Skipped
        );

        let unsigned = VerificationInfo::new("k");
        assert!(matches!(
            verify_payload(&SignatureSettings::default(), &unsigned, &payload),
            Err(HubError::SignatureVerificationFailed)
        ));
    }

    #[test]
    fn verification_args_wrap_the_request() {
        let args = verification_args(json!({ "url": "http://example.com" }));
        assert_eq!(args, vec![json!({ "verificationRequest": { "url": "http://example.com" } })]);
    }

    #[test]
    fn translation_args_carry_flag_payload_and_info() {
        let args = translation_args(json!([1]), None).unwrap();
        assert_eq!(args, vec![json!(true), json!([1]), Value::Null]);

        let info = VerificationInfo::new("k").with_header("X-Hub-Signature", "abc");
        let args = translation_args(json!({}), Some(&info)).unwrap();
        assert_eq!(args[2]["key"], "k");
        assert_eq!(args[2]["header"]["X-Hub-Signature"], "abc");
    }

    #[test]
    fn subscription_result_accepts_strings_objects_and_null() {
        assert_eq!(
            subscription_result(json!("challenge")).unwrap().response.as_deref(),
            Some("challenge")
        );
        let parsed = subscription_result(json!({ "response": "c", "expiration": 60 })).unwrap();
        assert_eq!(parsed.expiration, 60);
        assert_eq!(subscription_result(Value::Null).unwrap(), SubscriptionResult::default());
        assert!(subscription_result(json!(42)).is_err());
    }
}
