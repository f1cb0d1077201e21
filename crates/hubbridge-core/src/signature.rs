// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HMAC signatures for inbound webhook payloads.
//!
//! Providers sign notification bodies with a shared key and send the hex
//! digest in a request header (`X-Hub-Signature` by default). Verification
//! compares digests in constant time.

use std::collections::HashMap;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use strum::{Display, EnumString};

use crate::error::HubError;

/// Header carrying the provider signature unless configured otherwise.
pub const DEFAULT_SIGNATURE_HEADER: &str = "X-Hub-Signature";

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Digest used to compute the message authentication code.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

/// Key and header material needed to check an inbound payload.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct VerificationInfo {
    /// Shared secret used to compute the HMAC.
    #[serde(default)]
    pub key: Option<String>,
    /// Headers of the inbound notification.
    #[serde(default)]
    pub header: HashMap<String, String>,
    /// Exact bytes received on the wire, if the transport kept them.
    #[serde(default, skip_serializing)]
    pub raw_body: Option<Vec<u8>>,
    /// Overrides the configured digest.
    #[serde(default)]
    pub algorithm: Option<SignatureAlgorithm>,
}

impl VerificationInfo {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }

    pub fn with_raw_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.raw_body = Some(body.into());
        self
    }

    /// Signature found under `header_name`, matched case-insensitively.
    pub fn signature(&self, header_name: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header_name))
            .map(|(_, value)| value.as_str())
    }
}

impl std::fmt::Debug for VerificationInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationInfo")
            .field("key", &self.key.as_ref().map(|_| "[redacted]"))
            .field("header", &self.header)
            .field("raw_body", &self.raw_body.as_ref().map(Vec::len))
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Hex-encoded HMAC of `body` under `key`.
pub fn compute_signature(
    algorithm: SignatureAlgorithm,
    key: &[u8],
    body: &[u8],
) -> Result<String, HubError> {
    let digest = match algorithm {
        SignatureAlgorithm::Sha1 => keyed::<HmacSha1>(key, body)?.finalize().into_bytes().to_vec(),
        SignatureAlgorithm::Sha256 => {
            keyed::<HmacSha256>(key, body)?.finalize().into_bytes().to_vec()
        }
    };
    Ok(hex::encode(digest))
}

/// Check `signature` (hex, optionally prefixed `sha1=`/`sha256=`) against the
/// HMAC of `body`.
pub fn verify_signature(
    algorithm: SignatureAlgorithm,
    key: &[u8],
    body: &[u8],
    signature: &str,
) -> Result<(), HubError> {
    let expected = hex::decode(strip_algorithm_prefix(signature.trim()))
        .map_err(|_| HubError::SignatureVerificationFailed)?;

    match algorithm {
        SignatureAlgorithm::Sha1 => keyed::<HmacSha1>(key, body)?.verify_slice(&expected),
        SignatureAlgorithm::Sha256 => keyed::<HmacSha256>(key, body)?.verify_slice(&expected),
    }
    .map_err(|_| HubError::SignatureVerificationFailed)
}

fn keyed<M: Mac + KeyInit>(key: &[u8], body: &[u8]) -> Result<M, HubError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| HubError::Internal(format!("invalid HMAC key: {e}")))?;
    mac.update(body);
    Ok(mac)
}

fn strip_algorithm_prefix(signature: &str) -> &str {
    signature
        .split_once('=')
        .filter(|(prefix, _)| prefix.parse::<SignatureAlgorithm>().is_ok())
        .map_or(signature, |(_, digest)| digest)
}
