//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! lifecycle/startup.rs, lifecycle/service.rs produce:
//!     → logging.rs (structured log events, one span per run)
//!     → metrics.rs (outcome counters, activation latency)
//!
//! Consumers:
//!     → stdout via tracing-subscriber (binary only)
//!     → any metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or a recorder
//! - Emitting a log record or a metric cannot fail a bootstrap

pub mod logging;
pub mod metrics;
