//! Pre-flight argument validation.
//!
//! # Responsibilities
//! - Reject a bootstrap map that is not a keyed table of descriptors
//! - Reject a missing config locator or service locator
//!
//! # Design Decisions
//! - Pure functions: nothing is invoked, nothing is logged
//! - Locator errors carry a two-level shape chain (member, then argument)

use serde_json::Value;

use crate::lifecycle::error::{BootstrapError, ShapeError};
use crate::lifecycle::locator::{ConfigLocator, ServiceLocator};
use crate::lifecycle::map::{BootstrapMap, Descriptor};

/// Name of the shape of an untyped value.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check that `value` is a keyed table whose values are booleans or strings.
pub fn validate_bootstrap_map(value: &Value) -> Result<BootstrapMap, BootstrapError> {
    let table = match value {
        Value::Object(table) => table,
        other => {
            return Err(BootstrapError::InvalidBootstrapMap(ShapeError::new(
                "bootstrapMap",
                kind_of(other),
            )))
        }
    };

    let mut map = BootstrapMap::new();
    for (id, descriptor) in table {
        let descriptor = match descriptor {
            Value::Bool(active) => Descriptor::from(*active),
            Value::String(path) => Descriptor::ConfigPath(path.clone()),
            other => {
                return Err(BootstrapError::InvalidBootstrapMap(ShapeError::new(
                    format!("bootstrapMap[\"{}\"]", id),
                    kind_of(other),
                )))
            }
        };
        map.insert(id.clone(), descriptor);
    }

    Ok(map)
}

/// Error for a bootstrap map that was never supplied.
pub fn missing_bootstrap_map() -> BootstrapError {
    BootstrapError::InvalidBootstrapMap(ShapeError::new("bootstrapMap", "null"))
}

pub fn validate_config_locator(
    locator: Option<&ConfigLocator>,
) -> Result<&ConfigLocator, BootstrapError> {
    locator.ok_or_else(|| {
        BootstrapError::InvalidConfigLocator(
            ShapeError::new("configLocator.find", "undefined")
                .caused_by(ShapeError::new("configLocator", "null")),
        )
    })
}

pub fn validate_service_locator(
    locator: Option<&ServiceLocator>,
) -> Result<&ServiceLocator, BootstrapError> {
    locator.ok_or_else(|| {
        BootstrapError::InvalidServiceLocator(
            ShapeError::new("serviceLocator.locate", "undefined")
                .caused_by(ShapeError::new("serviceLocator", "null")),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_rejects_non_tables() {
        for value in [json!(null), json!([true]), json!("serviceA"), json!(3)] {
            let err = validate_bootstrap_map(&value).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidBootstrapMap);
        }
    }

    #[test]
    fn test_reports_rejected_shape() {
        let err = validate_bootstrap_map(&json!(["a"])).unwrap_err();
        let cause = err.chain().nth(1).unwrap().to_string();
        assert_eq!(cause, "Invalid bootstrapMap type \"array\"");
    }

    #[test]
    fn test_rejects_bad_descriptor() {
        let err = validate_bootstrap_map(&json!({"a": true, "b": {"nested": 1}})).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidBootstrapMap);
        assert!(err.chain().any(|e| e.to_string().contains("bootstrapMap[\"b\"]")));
    }

    #[test]
    fn test_accepts_empty_and_mixed_tables() {
        assert!(validate_bootstrap_map(&json!({})).unwrap().is_empty());

        let map = validate_bootstrap_map(&json!({"a": true, "b": false, "c": "@ns/c"})).unwrap();
        assert_eq!(map.get("c"), Some(&Descriptor::ConfigPath("@ns/c".into())));
    }

    #[test]
    fn test_missing_locators_chain_two_levels() {
        let err = validate_config_locator(None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidConfigLocator);
        assert_eq!(err.chain().count(), 3);

        let err = validate_service_locator(None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidServiceLocator);
        let last = err.chain().last().unwrap().to_string();
        assert_eq!(last, "Invalid serviceLocator type \"null\"");
    }
}
