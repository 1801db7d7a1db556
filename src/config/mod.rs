//! Manifest management subsystem.
//!
//! # Data Flow
//! ```text
//! manifest file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → Manifest (validated, immutable)
//!     → Manifest::bootstrapper() feeds lifecycle/startup.rs
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal manifests
//! - `[bootstrap]` keeps the order the file declares
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_manifest, parse_manifest, ConfigError};
pub use schema::{Manifest, SettingsConfig};
pub use validation::{validate_manifest, ValidationError};
