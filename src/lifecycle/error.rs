//! Startup error types.
//!
//! Two tiers: pre-flight errors (map and locator shape) carry a chain of
//! [`ShapeError`] nodes, and per-entry failures are wrapped in
//! [`BootstrapError::BootstrapFailed`] with the original failure as source.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Boxed error used for locator and lifecycle failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for startup operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Stable identifiers for programmatic handling of startup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidBootstrapMap,
    InvalidConfigLocator,
    InvalidServiceLocator,
    InvalidServiceInterface,
    BootstrapFailed,
}

impl ErrorCode {
    /// Wire-stable code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBootstrapMap => "E_BOOTSTRAP_INVALID_MAP",
            ErrorCode::InvalidConfigLocator => "E_BOOTSTRAP_INVALID_CONFIG_LOCATOR",
            ErrorCode::InvalidServiceLocator => "E_BOOTSTRAP_INVALID_SERVICE_LOCATOR",
            ErrorCode::InvalidServiceInterface => "E_BOOTSTRAP_INVALID_SERVICE_INTERFACE",
            ErrorCode::BootstrapFailed => "E_BOOTSTRAP",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes a rejected argument shape, optionally caused by another.
///
/// For locators the outer node names the expected member
/// (`configLocator.find`) and its cause names the argument itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {subject} type \"{found}\"")]
pub struct ShapeError {
    /// What was inspected, e.g. `bootstrapMap` or `serviceLocator.locate`.
    pub subject: String,
    /// The shape that was found instead.
    pub found: String,
    #[source]
    pub cause: Option<Box<ShapeError>>,
}

impl ShapeError {
    pub fn new(subject: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            found: found.into(),
            cause: None,
        }
    }

    /// Attach the shape that caused this one.
    pub fn caused_by(mut self, cause: ShapeError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

/// Errors surfaced by [`crate::lifecycle::bootstrap`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("BootstrapMap must be a keyed table of service descriptors")]
    InvalidBootstrapMap(#[source] ShapeError),

    #[error("ConfigLocator must be a function, or an object with a \"find\" method")]
    InvalidConfigLocator(#[source] ShapeError),

    #[error("ServiceLocator must be a function, or an object with a \"locate\" method")]
    InvalidServiceLocator(#[source] ShapeError),

    /// Resolved service exposes no lifecycle method.
    #[error("Expecting the service \"{service}\" to have a \"bootstrap\" method")]
    InvalidServiceInterface { service: String },

    /// Any failure while activating a single entry.
    #[error("Could not fulfill the bootstrap process for \"{service}\"")]
    BootstrapFailed {
        service: String,
        #[source]
        source: BoxError,
    },
}

impl BootstrapError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BootstrapError::InvalidBootstrapMap(_) => ErrorCode::InvalidBootstrapMap,
            BootstrapError::InvalidConfigLocator(_) => ErrorCode::InvalidConfigLocator,
            BootstrapError::InvalidServiceLocator(_) => ErrorCode::InvalidServiceLocator,
            BootstrapError::InvalidServiceInterface { .. } => ErrorCode::InvalidServiceInterface,
            BootstrapError::BootstrapFailed { .. } => ErrorCode::BootstrapFailed,
        }
    }

    /// Service key of the failing entry, for per-entry errors.
    pub fn service(&self) -> Option<&str> {
        match self {
            BootstrapError::InvalidServiceInterface { service }
            | BootstrapError::BootstrapFailed { service, .. } => Some(service),
            _ => None,
        }
    }

    /// Code of the chained cause when that cause is itself a startup error.
    pub fn cause_code(&self) -> Option<ErrorCode> {
        self.source()?
            .downcast_ref::<BootstrapError>()
            .map(BootstrapError::code)
    }

    /// Iterate this error followed by every chained cause.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(Some(self as &(dyn StdError + 'static)), |&e| e.source())
    }
}
