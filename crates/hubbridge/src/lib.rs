// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hubbridge - one contract for many smart-home hubs.
//!
//! The [`HubController`] resolves hubs from a lazily enriched registry,
//! builds per-call translators, dispatches named operations onto them and
//! returns every failure as a [`NormalizedError`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use hubbridge::HubController;
//! use hubbridge_plugin::TranslatorRegistry;
//!
//! let config = hubbridge_config::load_config()?;
//! let registry = Arc::new(TranslatorRegistry::new());
//! let controller = HubController::from_config(&config, registry);
//! for hub in controller.list_supported_hubs().await?.iter() {
//!     println!("{} ({})", hub.name, hub.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod dispatch;
pub mod factory;
pub mod normalize;
pub mod registry;
pub mod telemetry;
pub mod verification;

pub use controller::HubController;
pub use dispatch::{Dispatcher, TranslatorTarget};
pub use factory::TranslatorFactory;
pub use normalize::{NormalizedError, normalize};
pub use registry::HubRegistry;
pub use telemetry::{LogHandle, init_tracing};
pub use verification::{SignatureSettings, Verification};
