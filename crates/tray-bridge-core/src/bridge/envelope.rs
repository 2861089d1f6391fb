use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::BridgeError;

/// One inbound method call addressed to a named endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEnvelope {
    /// Endpoint name, e.g. [`SYSTEM_TRAY_ENDPOINT`](crate::SYSTEM_TRAY_ENDPOINT).
    pub endpoint: String,
    /// Method name on that endpoint.
    pub method: String,
    /// Loosely typed argument payload. `Value::Null` when the caller
    /// passed no arguments.
    pub args: Value,
}

impl CallEnvelope {
    /// Builds an envelope for `method` on `endpoint` with the given arguments.
    pub fn new(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        args: Value,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            args,
        }
    }
}

/// Response to a [`CallEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallResult {
    /// The call succeeded, carrying an optional return value.
    Success(Value),
    /// The call failed with a wire error code and message.
    Error {
        /// Stable machine-readable code, e.g. `INVALID_ARGUMENTS`.
        code: String,
        /// Human-readable description.
        message: String,
    },
    /// The method name is not recognized on this endpoint.
    ///
    /// This is the "unknown method" response, never an error.
    NotImplemented,
}

impl CallResult {
    /// Success with no return value.
    pub fn ok() -> Self {
        CallResult::Success(Value::Null)
    }

    /// Error with the given code and message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        CallResult::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether this is a [`CallResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }
}

impl From<&BridgeError> for CallResult {
    fn from(error: &BridgeError) -> Self {
        CallResult::Error {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}
