//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the binary
//! - Honor `RUST_LOG` before the manifest log level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via manifest and environment

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither the environment nor the manifest sets one.
pub const DEFAULT_FILTER: &str = "service_bootstrap=info";

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins; otherwise `level` applies to this crate.
pub fn init_logging(level: Option<&str>) {
    let fallback = level
        .map(|level| format!("service_bootstrap={}", level))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
