//! Ordered service bootstrap.
//!
//! Resolves each service named in a bootstrap map through a service
//! locator, resolves its configuration through a config locator, and
//! calls the service's startup lifecycle with it, strictly in map order.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::Manifest;
pub use lifecycle::{bootstrap, BootstrapError, BootstrapMap, Bootstrapper};
pub use registry::{ConfigTable, ServiceRegistry};
