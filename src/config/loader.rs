//! Manifest loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Manifest;
use crate::config::validation::{validate_manifest, ValidationError};

/// Error type for manifest loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] toml::de::Error),

    /// Every semantic problem found, in manifest order.
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a manifest from TOML text.
pub fn parse_manifest(content: &str) -> Result<Manifest, ConfigError> {
    let manifest: Manifest = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_manifest(&manifest).map_err(ConfigError::Validation)?;

    Ok(manifest)
}

/// Load and validate a manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_manifest(&content)
}
