//! Metrics collection.
//!
//! # Metrics
//! - `bootstrap_services_total` (counter): entries by outcome
//!   (`bootstrapped`, `skipped`, `failed`)
//! - `bootstrap_service_duration_seconds` (histogram): time spent
//!   locating, configuring and bootstrapping one service
//!
//! # Design Decisions
//! - Goes through the `metrics` facade; a no-op until a recorder exists

use std::time::Duration;

pub fn record_service_outcome(outcome: &'static str) {
    ::metrics::counter!("bootstrap_services_total", "outcome" => outcome).increment(1);
}

pub fn record_service_duration(duration: Duration) {
    ::metrics::histogram!("bootstrap_service_duration_seconds").record(duration.as_secs_f64());
}
