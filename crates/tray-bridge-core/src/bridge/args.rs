use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::{Map, Value};

use crate::{BridgeError, Result};

/// Typed view over a call's argument map.
///
/// Extraction returns a [`BridgeError::InvalidArguments`] on a shape
/// mismatch instead of aborting, which is the hardened replacement for
/// the duck-typed payload access the wire contract historically allowed.
#[derive(Debug, Clone, Copy)]
pub struct CallArgs<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> CallArgs<'a> {
    /// Interprets `args` as a map.
    #[track_caller]
    pub fn from_value(args: &'a Value) -> Result<Self> {
        match args.as_object() {
            Some(map) => Ok(Self { map }),
            None => Err(BridgeError::InvalidArguments {
                reason: "Arguments must be a map".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Returns `key` as a string, `None` when absent.
    #[track_caller]
    pub fn opt_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(BridgeError::InvalidArguments {
                reason: format!("`{key}` must be a string, got {}", type_name(other)),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Returns `key` as a list, `None` when absent.
    #[track_caller]
    pub fn opt_list(&self, key: &str) -> Result<Option<&'a [Value]>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Array(values)) => Ok(Some(values)),
            Some(other) => Err(BridgeError::InvalidArguments {
                reason: format!("`{key}` must be a list, got {}", type_name(other)),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
