//! In-memory locators.
//!
//! # Data Flow
//! ```text
//! ServiceRegistry (services.rs): id → ServiceRef   → ServiceLocator::object
//! ConfigTable     (config.rs):   key → Config      → ConfigLocator::object
//! ```
//!
//! # Design Decisions
//! - Plain keyed storage: no merging, no lazy construction
//! - Safe to share across tasks (DashMap behind an Arc)

pub mod config;
pub mod services;

pub use config::ConfigTable;
pub use services::{RegistryError, ServiceRegistry};
