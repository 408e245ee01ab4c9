//! Error translator
//!
//! Every runtime failure becomes a response of the same shape:
//! `data = {"status": "ERROR", "error": <message>}`. The transport code
//! distinguishes failures that never reached a command.

use crate::adapter::error_data;
use crate::errors::CmdError;
use crate::wire::{ResponseCode, WireResponse};

/// Transport code for an error class
pub fn response_code(err: &CmdError) -> ResponseCode {
    match err {
        CmdError::InvalidRequest { .. } => ResponseCode::InvalidRequest,
        CmdError::UnknownCommand { .. } => ResponseCode::UnknownCommand,
        CmdError::Encode { .. }
        | CmdError::DuplicateCommand { .. }
        | CmdError::Registration { .. } => ResponseCode::InternalError,
        CmdError::Decode { .. }
        | CmdError::MissingField { .. }
        | CmdError::Business { .. }
        | CmdError::UnexpectedFault { .. } => ResponseCode::Ok,
    }
}

/// Convert any dispatch failure into a wire response
pub fn error_response(err: &CmdError) -> WireResponse {
    let message = err.to_string();
    let data = error_data(message.clone());
    match response_code(err) {
        ResponseCode::Ok => WireResponse::ok(data),
        code => WireResponse::failure(code, message, data),
    }
}
