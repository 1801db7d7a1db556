//! Manifest validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check settings are usable (label, namespace rule, log level)
//! - Check bootstrap entries (ids and config paths not blank)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Manifest → Result<(), Vec<ValidationError>>
//! - Runs before a manifest is handed to the runner

use thiserror::Error;

use crate::config::schema::Manifest;
use crate::lifecycle::Descriptor;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("settings.label must not be empty")]
    EmptyLabel,

    #[error("settings.path_separator must differ from settings.namespace_marker ('{0}')")]
    SeparatorIsMarker(char),

    #[error("settings.log_level \"{0}\" is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("bootstrap entry ids must not be blank")]
    BlankServiceId,

    #[error("bootstrap entry \"{0}\" has a blank config path")]
    BlankConfigPath(String),
}

pub fn validate_manifest(manifest: &Manifest) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let settings = &manifest.settings;

    if settings.label.trim().is_empty() {
        errors.push(ValidationError::EmptyLabel);
    }

    if settings.path_separator == settings.namespace_marker {
        errors.push(ValidationError::SeparatorIsMarker(settings.namespace_marker));
    }

    if !LOG_LEVELS.contains(&settings.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(settings.log_level.clone()));
    }

    for (id, descriptor) in manifest.bootstrap.iter() {
        if id.trim().is_empty() {
            errors.push(ValidationError::BlankServiceId);
        }
        if let Descriptor::ConfigPath(path) = descriptor {
            if path.trim().is_empty() {
                errors.push(ValidationError::BlankConfigPath(id.to_string()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_is_valid() {
        assert!(validate_manifest(&Manifest::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut manifest = Manifest::default();
        manifest.settings.label = " ".into();
        manifest.settings.path_separator = '@';
        manifest.settings.log_level = "loud".into();
        manifest.bootstrap.insert("", true);
        manifest.bootstrap.insert("mailer", "");

        let errors = validate_manifest(&manifest).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyLabel,
                ValidationError::SeparatorIsMarker('@'),
                ValidationError::UnknownLogLevel("loud".into()),
                ValidationError::BlankServiceId,
                ValidationError::BlankConfigPath("mailer".into()),
            ]
        );
    }
}
