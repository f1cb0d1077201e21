// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error normalization at the public controller boundary.
//!
//! Every failure surfaced by a public operation passes through [`normalize`]
//! exactly once. Internal helpers keep propagating plain [`HubError`]s.

use hubbridge_core::HubError;
use thiserror::Error;

/// Status used when the underlying error carries none.
pub const DEFAULT_STATUS: u16 = 500;

/// A failure returned by a public hub operation.
///
/// `message` names the operation that failed; the original error is kept
/// in `inner` for callers that need to match on it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct NormalizedError {
    pub status_code: u16,
    pub message: String,
    #[source]
    pub inner: HubError,
}

impl NormalizedError {
    /// Display text of the wrapped error.
    pub fn inner_message(&self) -> String {
        self.inner.to_string()
    }
}

/// Wrap `err` raised while running the operation named `label`.
///
/// The status comes from a transport response when there is one, then from
/// the error's own status, then defaults to 500.
pub fn normalize(err: HubError, label: &str) -> NormalizedError {
    let (status_code, original) = match &err {
        HubError::Transport {
            status,
            status_message,
        } => (*status, status_message.clone()),
        other => (other.status_code().unwrap_or(DEFAULT_STATUS), other.to_string()),
    };

    let message = format!("call failed in: {label}; original message: {original}");
    tracing::debug!(status_code, operation = label, error = %err, "hub operation failed");

    NormalizedError {
        status_code,
        message,
        inner: err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn message_names_operation_and_original_text() {
        let err = normalize(
            HubError::InvalidHubId {
                hub_id: "nope".into(),
            },
            "listPlatforms",
        );
        assert_eq!(err.status_code, 404);
        assert_eq!(
            err.message,
            "call failed in: listPlatforms; original message: InvalidHubId"
        );
        assert_eq!(err.inner_message(), "InvalidHubId");
    }

    #[test]
    fn transport_status_wins() {
        let err = normalize(
            HubError::Transport {
                status: 503,
                status_message: "Service Unavailable".into(),
            },
            "getPlatform",
        );
        assert_eq!(err.status_code, 503);
        assert!(err.message.ends_with("original message: Service Unavailable"));
    }

    #[test]
    fn statusless_errors_default_to_500() {
        let err = normalize(HubError::translator("boom"), "setResource");
        assert_eq!(err.status_code, DEFAULT_STATUS);
        assert!(err.message.contains("translator error: boom"));
    }

    #[test]
    fn inner_error_is_the_source() {
        let err = normalize(HubError::SignatureVerificationFailed, "translatePlatforms");
        assert_eq!(err.status_code, 401);
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("HMacSignatureVerificationFailed"));
    }
}
