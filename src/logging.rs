//! Tracing setup for the binary.
//!
//! The subscriber is installed before anything else runs so config loading
//! can already log. Its filter is swapped for the configured one afterwards,
//! unless `RUST_LOG` was set.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Filter used until the configuration has been read.
pub const DEFAULT_FILTER: &str = "info";

/// Handle for replacing the active filter.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Install the global subscriber. `RUST_LOG` wins, else [`DEFAULT_FILTER`].
pub fn init() -> FilterHandle {
    let (filter, handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    handle
}

/// Switch to `configured` unless the environment already chose a filter.
///
/// # Errors
///
/// Returns an error if the subscriber behind `handle` is gone.
pub fn apply_configured(
    handle: &FilterHandle,
    rust_log: Option<&str>,
    configured: &str,
) -> Result<()> {
    if rust_log.is_some_and(|value| !value.trim().is_empty()) {
        return Ok(());
    }

    handle
        .reload(EnvFilter::new(configured))
        .context("Failed to apply configured log filter")
}
