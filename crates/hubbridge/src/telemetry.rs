// SPDX-FileCopyrightText: 2026 Hubbridge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup with a runtime-adjustable log level.
//!
//! `RUST_LOG` wins when set. Otherwise the filter is
//! `hubbridge=<level>,warn`, and [`LogHandle::set_level`] swaps it in place.
//! [`LogHandle::level`] reports whichever of the two is in effect.

use std::sync::Arc;

use arc_swap::ArcSwap;
use hubbridge_core::HubError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Handle to the installed log filter.
#[derive(Clone)]
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    level: Arc<ArcSwap<String>>,
}

impl LogHandle {
    /// The level most recently applied to the `hubbridge` target, or the
    /// `RUST_LOG` directive while that still drives the filter.
    pub fn level(&self) -> String {
        self.level.load().as_ref().clone()
    }

    /// Replace the filter with one at `level`.
    pub fn set_level(&self, level: &str) -> Result<(), HubError> {
        let level = parse_level(level)?;
        self.filter
            .reload(EnvFilter::new(directive(&level)))
            .map_err(|e| HubError::Internal(format!("failed to reload log filter: {e}")))?;
        tracing::info!(%level, "log level changed");
        self.level.store(Arc::new(level));
        Ok(())
    }
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle").field("level", &self.level()).finish_non_exhaustive()
    }
}

/// Install the global tracing subscriber.
///
/// Fails if `level` is not a known level or a subscriber is already set.
pub fn init_tracing(level: &str) -> Result<LogHandle, HubError> {
    let level = parse_level(level)?;
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, reported) = initial_filter(&level, env.as_deref());
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_names(false))
        .try_init()
        .map_err(|e| HubError::Internal(format!("failed to install tracing subscriber: {e}")))?;

    Ok(LogHandle {
        filter: handle,
        level: Arc::new(ArcSwap::from_pointee(reported)),
    })
}

/// The filter to install first, and the text [`LogHandle::level`] reports
/// for it. A parseable, non-empty `env` directive takes precedence.
fn initial_filter(level: &str, env: Option<&str>) -> (EnvFilter, String) {
    let from_env = env
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok());
    match from_env {
        Some(filter) => {
            let reported = filter.to_string();
            (filter, reported)
        }
        None => (EnvFilter::new(directive(level)), level.to_string()),
    }
}

fn parse_level(level: &str) -> Result<String, HubError> {
    let level = level.trim().to_ascii_lowercase();
    if LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(HubError::Config(format!(
            "invalid log level '{level}', expected one of: {}",
            LEVELS.join(", ")
        )))
    }
}

fn directive(level: &str) -> String {
    format!("hubbridge={level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_normalizes_case() {
        assert_eq!(parse_level(" DEBUG ").unwrap(), "debug");
    }

    #[test]
    fn parse_level_rejects_unknown() {
        let err = parse_level("verbose").unwrap_err();
        assert!(err.to_string().contains("invalid log level 'verbose'"));
    }

    #[test]
    fn env_directive_is_reported_when_it_drives_the_filter() {
        let (_, reported) = initial_filter("info", Some("hubbridge=trace"));
        assert!(reported.contains("hubbridge=trace"));

        let (_, reported) = initial_filter("info", None);
        assert_eq!(reported, "info");

        let (_, reported) = initial_filter("warn", Some("  "));
        assert_eq!(reported, "warn");
    }

    #[test]
    fn directive_scopes_level_to_crate() {
        assert_eq!(directive("trace"), "hubbridge=trace,warn");
    }
}
