// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the hubbridge hub-abstraction layer.

use thiserror::Error;

/// Marker text for a hub id that is not present in the registry.
pub const INVALID_HUB_ID: &str = "InvalidHubId";

/// Marker text for a provider payload naming a platform no translator knows.
pub const UNKNOWN_PLATFORM: &str = "UnknownPlatform";

/// Marker text for an inbound webhook whose signature does not match.
pub const HMAC_SIGNATURE_VERIFICATION_FAILED: &str = "HMacSignatureVerificationFailed";

/// Marker text for malformed or missing auth/onboarding input.
pub const INVALID_AUTH_INFO_INPUT: &str = "InvalidAuthInfoInput";

/// The primary error type used by collaborators, translators and the core.
///
/// Internal helpers propagate these untouched; the public controller surface
/// wraps them into a `NormalizedError` at its own boundary.
#[derive(Debug, Error)]
pub enum HubError {
    /// Requested hub id is not present in the registry.
    #[error("InvalidHubId")]
    InvalidHubId { hub_id: String },

    /// Provider payload names a platform model no translator recognizes.
    #[error("UnknownPlatform: {model}")]
    UnknownPlatform { model: String },

    /// Inbound webhook signature did not match the computed MAC.
    #[error("HMacSignatureVerificationFailed")]
    SignatureVerificationFailed,

    /// Auth or onboarding info supplied by the caller is malformed or missing.
    #[error("InvalidAuthInfoInput")]
    InvalidAuthInfoInput,

    /// A translator was asked to run an operation it does not implement.
    #[error("unsupported operation `{operation}` on translator {translator}")]
    UnsupportedOperation {
        translator: String,
        operation: String,
    },

    /// No translator is registered under the given reference.
    #[error("translator not found: {reference}")]
    TranslatorNotFound { reference: String },

    /// No onboarding module is registered under the given reference.
    #[error("onboarding module not found: {reference}")]
    OnboardingNotFound { reference: String },

    /// Package discovery for a translator reference failed or came back empty.
    #[error("package discovery failed for {reference}: {message}")]
    Discovery { reference: String, message: String },

    /// A network call made by a translator failed with an HTTP-style status.
    #[error("transport error {status}: {status_message}")]
    Transport { status: u16, status_message: String },

    /// Any other failure raised by a translator or onboarding module.
    #[error("translator error: {message}")]
    Translator {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid hub list, bad settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Shorthand for a translator failure without an underlying cause.
    pub fn translator(message: impl Into<String>) -> Self {
        HubError::Translator {
            message: message.into(),
            source: None,
        }
    }

    /// HTTP-style status code carried by this error, if it has one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HubError::InvalidHubId { .. }
            | HubError::UnknownPlatform { .. }
            | HubError::TranslatorNotFound { .. }
            | HubError::OnboardingNotFound { .. } => Some(404),
            HubError::SignatureVerificationFailed | HubError::InvalidAuthInfoInput => Some(401),
            HubError::UnsupportedOperation { .. } => Some(501),
            HubError::Transport { status, .. } => Some(*status),
            HubError::Discovery { .. }
            | HubError::Translator { .. }
            | HubError::Config(_)
            | HubError::Internal(_) => None,
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::Translator {
            message: format!("malformed translator payload: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_variants_render_exact_marker_text() {
        let invalid = HubError::InvalidHubId {
            hub_id: "nope".into(),
        };
        assert_eq!(invalid.to_string(), INVALID_HUB_ID);
        assert_eq!(
            HubError::SignatureVerificationFailed.to_string(),
            HMAC_SIGNATURE_VERIFICATION_FAILED
        );
        assert_eq!(
            HubError::InvalidAuthInfoInput.to_string(),
            INVALID_AUTH_INFO_INPUT
        );
    }

    #[test]
    fn unknown_platform_starts_with_marker_and_ends_with_model() {
        let err = HubError::UnknownPlatform {
            model: "acme-unknown".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with(UNKNOWN_PLATFORM));
        assert!(msg.ends_with("acme-unknown"));
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            HubError::InvalidHubId {
                hub_id: "x".into()
            }
            .status_code(),
            Some(404)
        );
        assert_eq!(HubError::SignatureVerificationFailed.status_code(), Some(401));
        assert_eq!(HubError::InvalidAuthInfoInput.status_code(), Some(401));
        assert_eq!(
            HubError::Transport {
                status: 503,
                status_message: "Service Unavailable".into()
            }
            .status_code(),
            Some(503)
        );
        assert_eq!(HubError::translator("boom").status_code(), None);
    }
}
