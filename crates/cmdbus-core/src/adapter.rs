//! Typed envelope codec
//!
//! Converts between the command-agnostic wire envelope and a command's
//! declared request/response types. Decoding fails closed: unknown fields
//! and type mismatches are rejected before any validation runs.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::{CmdError, Result};
use crate::wire::{WireRequest, WireResponse};

/// Command-level status carried in every typed response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReturnStatus {
    Ok,
    Error,
}

/// A command response: status, optional error message, flattened payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedResponse<T> {
    pub status: ReturnStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Option<T>,
}

impl<T> TypedResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            status: ReturnStatus::Ok,
            error: None,
            payload: Some(payload),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ReturnStatus::Error,
            error: Some(message.into()),
            payload: None,
        }
    }
}

/// Payload for commands that return nothing beyond their status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Empty {}

/// JSON text produced by a backend, embedded as a structured value
///
/// Serialization parses the text; invalid JSON makes encoding fail, which
/// the registry reports as an encode error instead of sending a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonText(String);

impl JsonText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for JsonText {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value: Value = serde_json::from_str(&self.0).map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

/// Decode a request's parameters into `Req`
///
/// Absent or `null` parameters decode as an empty object, so commands
/// without fields accept bare requests.
pub fn from_wire_request<Req>(command: &str, request: &WireRequest) -> Result<Req>
where
    Req: DeserializeOwned,
{
    serde_json::from_value(request.parameters_or_empty()).map_err(|e| CmdError::Decode {
        command: command.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a typed response into a routed wire response
pub fn to_wire_response<T>(command: &str, response: &TypedResponse<T>) -> Result<WireResponse>
where
    T: Serialize,
{
    let data = serde_json::to_value(response).map_err(|e| CmdError::Encode {
        command: command.to_string(),
        reason: e.to_string(),
    })?;
    Ok(WireResponse::ok(data))
}

/// Build the uniform error payload `{"status":"ERROR","error":<message>}`
pub fn error_data(message: impl Into<String>) -> Value {
    let response = TypedResponse::<Empty>::error(message);
    // Status + string always serialize.
    serde_json::to_value(&response).unwrap_or(Value::Null)
}
