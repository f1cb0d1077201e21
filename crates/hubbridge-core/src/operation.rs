// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named operations a translator can be asked to perform.
//!
//! The wire names (`getPlatforms`, `postDevicesState`, ...) are a contract
//! shared with every translator plugin and must not change.

use crate::error::HubError;

const POST_DEVICES: &str = "postDevices";

/// An operation dispatched to a translator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `getPlatforms`: list (or translate) the platforms behind a hub.
    GetPlatforms,
    /// `get`: read one platform.
    Get,
    /// `postSubscribe`: create a subscription or answer a verification.
    PostSubscribe,
    /// `deleteSubscribe`: remove a subscription.
    DeleteSubscribe,
    /// `refreshAuthToken`: exchange stale credentials for fresh ones.
    RefreshAuthToken,
    /// `postDevices<Resource>`: set a resource on a device.
    ///
    /// Holds the resource segment exactly as it appears in the wire name.
    PostDevices { resource: String },
}

impl Operation {
    /// Operation that sets `resource_id` on a device.
    ///
    /// Only the first character of the resource id is upper-cased.
    pub fn set_resource(resource_id: &str) -> Self {
        Operation::PostDevices {
            resource: capitalize_first(resource_id),
        }
    }

    /// The wire name sent to translators.
    pub fn name(&self) -> String {
        match self {
            Operation::GetPlatforms => "getPlatforms".to_string(),
            Operation::Get => "get".to_string(),
            Operation::PostSubscribe => "postSubscribe".to_string(),
            Operation::DeleteSubscribe => "deleteSubscribe".to_string(),
            Operation::RefreshAuthToken => "refreshAuthToken".to_string(),
            Operation::PostDevices { resource } => format!("{POST_DEVICES}{resource}"),
        }
    }

    /// Map a wire name back to an operation.
    pub fn parse(name: &str) -> Result<Self, HubError> {
        match name {
            "getPlatforms" => Ok(Operation::GetPlatforms),
            "get" => Ok(Operation::Get),
            "postSubscribe" => Ok(Operation::PostSubscribe),
            "deleteSubscribe" => Ok(Operation::DeleteSubscribe),
            "refreshAuthToken" => Ok(Operation::RefreshAuthToken),
            _ => match name.strip_prefix(POST_DEVICES) {
                Some(resource) => Ok(Operation::PostDevices {
                    resource: resource.to_string(),
                }),
                None => Err(HubError::UnsupportedOperation {
                    translator: "<dispatch>".to_string(),
                    operation: name.to_string(),
                }),
            },
        }
    }

    /// Error a translator returns for an operation it does not implement.
    pub fn unsupported_by(&self, translator: &str) -> HubError {
        HubError::UnsupportedOperation {
            translator: translator.to_string(),
            operation: self.name(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn set_resource_names() {
        assert_eq!(Operation::set_resource("brightness").name(), "postDevicesBrightness");
        assert_eq!(Operation::set_resource("state").name(), "postDevicesState");
        assert_eq!(Operation::set_resource("").name(), "postDevices");
        assert_eq!(Operation::set_resource("colourRGB").name(), "postDevicesColourRGB");
    }

    #[test]
    fn parse_known_names() {
        assert_eq!(Operation::parse("getPlatforms").unwrap(), Operation::GetPlatforms);
        assert_eq!(Operation::parse("deleteSubscribe").unwrap(), Operation::DeleteSubscribe);
        assert_eq!(
            Operation::parse("postDevicesBrightness").unwrap(),
            Operation::set_resource("brightness")
        );
    }

    #[test]
    fn parse_unknown_name_is_unsupported() {
        let err = Operation::parse("rebootEverything").unwrap_err();
        assert!(matches!(
            err,
            HubError::UnsupportedOperation { ref operation, .. } if operation == "rebootEverything"
        ));
        assert_eq!(err.status_code(), Some(501));
    }

    proptest! {
        #[test]
        fn set_resource_only_touches_first_char(resource in "[a-z][a-zA-Z0-9]{0,12}") {
            let name = Operation::set_resource(&resource).name();
            let suffix = name.strip_prefix("postDevices").unwrap();
            prop_assert_eq!(&suffix[1..], &resource[1..]);
            prop_assert_eq!(suffix[..1].to_string(), resource[..1].to_uppercase());
        }

        #[test]
        fn set_resource_name_parses_back(resource in "[a-zA-Z]{0,12}") {
            let op = Operation::set_resource(&resource);
            prop_assert_eq!(Operation::parse(&op.name()).unwrap(), op);
        }
    }
}
