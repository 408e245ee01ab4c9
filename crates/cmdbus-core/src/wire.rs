//! Transport-level envelope
//!
//! `WireRequest` and `WireResponse` are command-agnostic: the routing key is
//! `command`, everything command-specific lives in `parameters` / `data`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{CmdError, Result};

/// Envelope version understood by this registry
pub const PROTOCOL_VERSION: u32 = 1;

/// Who sent the request (informational, logged only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub name: String,
    pub module: String,
}

/// Inbound request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRequest {
    pub version: u32,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    #[serde(default)]
    pub parameters: Value,
}

impl WireRequest {
    /// Build a current-version request for `command`
    pub fn new(command: impl Into<String>, parameters: Value) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            command: command.into(),
            origin: None,
            parameters,
        }
    }

    /// Attach an origin
    pub fn with_origin(mut self, name: impl Into<String>, module: impl Into<String>) -> Self {
        self.origin = Some(Origin {
            name: name.into(),
            module: module.into(),
        });
        self
    }

    /// Parse and check a raw JSON envelope
    pub fn from_json(raw: &str) -> Result<Self> {
        let request: WireRequest =
            serde_json::from_str(raw).map_err(|e| CmdError::InvalidRequest {
                reason: e.to_string(),
            })?;
        request.check()?;
        Ok(request)
    }

    /// Check the envelope version and routing key
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a version other than [`PROTOCOL_VERSION`] or a
    /// blank command.
    pub fn check(&self) -> Result<()> {
        if self.version != PROTOCOL_VERSION {
            return Err(CmdError::InvalidRequest {
                reason: format!(
                    "unsupported version {} (expected {})",
                    self.version, PROTOCOL_VERSION
                ),
            });
        }
        if self.command.trim().is_empty() {
            return Err(CmdError::InvalidRequest {
                reason: "empty command".to_string(),
            });
        }
        Ok(())
    }

    /// Parameters as the typed decoder expects them (absent → `{}`)
    pub fn parameters_or_empty(&self) -> Value {
        match &self.parameters {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other.clone(),
        }
    }
}

/// Transport-level result code
///
/// `Ok` means the request was routed to a command; the command's own
/// OK/ERROR status is inside `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Ok = 0,
    InternalError = 1,
    InvalidRequest = 2,
    UnknownCommand = 3,
}

impl ResponseCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Outbound response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireResponse {
    pub error: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Value,
}

impl WireResponse {
    /// A routed response carrying typed `data`
    pub fn ok(data: Value) -> Self {
        Self {
            error: ResponseCode::Ok.as_i32(),
            message: None,
            data,
        }
    }

    /// A transport-level failure
    pub fn failure(code: ResponseCode, message: impl Into<String>, data: Value) -> Self {
        Self {
            error: code.as_i32(),
            message: Some(message.into()),
            data,
        }
    }

    /// The typed `status` field inside `data`, if present
    pub fn status(&self) -> Option<&str> {
        self.data.get("status").and_then(Value::as_str)
    }

    /// The typed `error` message inside `data`, if present
    pub fn error_message(&self) -> Option<&str> {
        self.data.get("error").and_then(Value::as_str)
    }

    /// Whether the command reported success
    pub fn is_ok(&self) -> bool {
        self.error == ResponseCode::Ok.as_i32() && self.status() == Some("OK")
    }

    /// Serialize to a single JSON line
    pub fn to_json(&self) -> String {
        // A struct of i32/String/Value always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"error":1,"message":"response serialization failed","data":{"status":"ERROR"}}"#
                .to_string()
        })
    }
}
