// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PubSubHubbub-style subscription verification requests.
//!
//! Providers confirm a callback by requesting it with `hub.mode`,
//! `hub.topic`, `hub.challenge` and `hub.lease_seconds` query parameters.
//! The subscriber echoes the challenge back.

use url::Url;

use crate::error::HubError;
use crate::types::SubscriptionResult;

/// A parsed verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubChallenge {
    pub mode: Option<String>,
    pub topic: Option<String>,
    pub challenge: String,
    pub lease_seconds: Option<u64>,
}

impl HubChallenge {
    pub fn from_url(raw: &str) -> Result<Self, HubError> {
        let url = Url::parse(raw)
            .map_err(|e| HubError::translator(format!("invalid verification url: {e}")))?;

        let mut mode = None;
        let mut topic = None;
        let mut challenge = None;
        let mut lease_seconds = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "hub.mode" => mode = Some(value.into_owned()),
                "hub.topic" => topic = Some(value.into_owned()),
                "hub.challenge" => challenge = Some(value.into_owned()),
                "hub.lease_seconds" => {
                    let secs = value.parse::<u64>().map_err(|_| {
                        HubError::translator(format!("invalid hub.lease_seconds `{value}`"))
                    })?;
                    lease_seconds = Some(secs);
                }
                _ => {}
            }
        }

        let challenge = challenge
            .ok_or_else(|| HubError::translator("verification request is missing hub.challenge"))?;

        Ok(Self {
            mode,
            topic,
            challenge,
            lease_seconds,
        })
    }

    /// The response that confirms the subscription.
    pub fn into_response(self) -> SubscriptionResult {
        SubscriptionResult {
            response: Some(self.challenge),
            expiration: self.lease_seconds.unwrap_or(0),
        }
    }
}
