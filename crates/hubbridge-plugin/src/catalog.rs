// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in hub catalog.
//!
//! The static hub list used when configuration does not declare its own.
//! Only `id`, `name` and `translator` are known up front; onboarding
//! metadata is filled in by package discovery.

use hubbridge_core::HubDescriptor;

/// Returns descriptors for the hubs supported out of the box.
pub fn builtin_hubs() -> Vec<HubDescriptor> {
    vec![
        HubDescriptor::new("wink", "Wink Hub", "translator-wink-hub"),
        HubDescriptor::new("smartthings", "SmartThings", "translator-smartthings-hub"),
        HubDescriptor::new("hue", "Philips Hue Bridge", "translator-hue-hub"),
        HubDescriptor::new("insteon", "Insteon Hub", "translator-insteon-hub"),
        HubDescriptor::new("nest", "Nest", "translator-nest-hub"),
        HubDescriptor::new("contosothings", "Contoso Things", "translator-contosothings-hub"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_hubs_have_unique_ids() {
        let hubs = builtin_hubs();
        let ids: HashSet<&str> = hubs.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids.len(), hubs.len());
    }

    #[test]
    fn builtin_hubs_start_unenriched() {
        assert!(builtin_hubs().iter().all(|h| !h.is_enriched() && h.onboarding_flow.is_none()));
    }

    #[test]
    fn builtin_hubs_reference_translators() {
        assert!(builtin_hubs().iter().all(|h| h.translator.starts_with("translator-")));
    }
}
