//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     bootstrap map + config locator + service locator
//!     → validation.rs (shape checks, no side effects)
//!     → locator.rs (normalize both locators once)
//!     → for each entry, in declaration order:
//!         inactive → skip
//!         active   → config_path.rs (derive keys)
//!                  → service.rs (locate service, resolve config,
//!                                check lifecycle, invoke it)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: entry N+1 starts only after entry N settled
//! - First failure aborts the run; earlier services stay bootstrapped
//! - Teardown is not managed here

pub mod config_path;
pub mod error;
pub mod locator;
pub mod map;
pub mod service;
pub mod startup;
pub mod validation;

pub use config_path::{ConfigPathResolver, EntryKeys, KeyNaming, NamespaceRule, ResolvedConfig};
pub use error::{BootstrapError, BootstrapResult, BoxError, ErrorCode, ShapeError};
pub use locator::{ConfigLocator, FindConfig, LocateFn, LocateService, ServiceLocator};
pub use map::{BootstrapMap, Descriptor};
pub use service::{Config, Lifecycle, Service, ServiceRef};
pub use startup::{bootstrap, BootstrapReport, Bootstrapper, EntryOutcome, MapInput, PlannedEntry};
