// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock onboarding module with a username/password flow.

use async_trait::async_trait;
use hubbridge_core::{AuthInfo, HubError, Onboarding};
use serde_json::{Value, json};

/// Token issued by a successful mock onboarding.
pub const MOCK_TOKEN: &str = "mock-token";

/// Accepts any non-empty username and password.
#[derive(Debug, Default)]
pub struct MockOnboarding;

#[async_trait]
impl Onboarding for MockOnboarding {
    async fn onboard(&self, onboarding_info: Value) -> Result<AuthInfo, HubError> {
        let field = |name: &str| {
            onboarding_info
                .get(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };
        let (Some(username), Some(_password)) = (field("username"), field("password")) else {
            return Err(HubError::InvalidAuthInfoInput);
        };
        Ok(AuthInfo::new(json!({
            "access": { "token": MOCK_TOKEN, "user": username }
        })))
    }
}
