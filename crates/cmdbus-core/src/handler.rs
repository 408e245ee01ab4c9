//! Command handlers
//!
//! A handler only translates a validated request into a backend call and
//! the backend's answer into a payload or a `BusinessError`. Decoding,
//! validation, encoding and fault isolation happen around it.

use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::adapter::{self, TypedResponse};
use crate::errors::{CmdError, Result};
use crate::validation::{self, Validate};
use crate::wire::{WireRequest, WireResponse};

/// Expected, reportable failure returned by a handler
///
/// The message reaches the caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BusinessError {
    message: String,
}

impl BusinessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type returned by handlers
pub type HandlerResult<T> = std::result::Result<T, BusinessError>;

/// A strongly-typed command implementation
pub trait CommandHandler: Send + Sync + 'static {
    /// Decoded request; required fields are checked before `handle`
    type Request: DeserializeOwned + Validate;
    /// Success payload, flattened next to `status`
    type Response: Serialize;

    fn handle(&self, request: Self::Request) -> HandlerResult<Self::Response>;
}

/// Handler backed by a closure
///
/// Built with [`handler_fn`]; the closure owns whatever backend it needs.
pub struct FnHandler<Req, Resp, F> {
    f: F,
    _types: PhantomData<fn(Req) -> Resp>,
}

/// Wrap a closure as a [`CommandHandler`]
pub fn handler_fn<Req, Resp, F>(f: F) -> FnHandler<Req, Resp, F>
where
    F: Fn(Req) -> HandlerResult<Resp> + Send + Sync + 'static,
{
    FnHandler {
        f,
        _types: PhantomData,
    }
}

impl<Req, Resp, F> CommandHandler for FnHandler<Req, Resp, F>
where
    Req: DeserializeOwned + Validate,
    Resp: Serialize + 'static,
    F: Fn(Req) -> HandlerResult<Resp> + Send + Sync + 'static,
{
    type Request = Req;
    type Response = Resp;

    fn handle(&self, request: Req) -> HandlerResult<Resp> {
        (self.f)(request)
    }
}

/// Type-erased handler stored by the registry
pub(crate) trait ErasedHandler: Send + Sync {
    fn call(&self, command: &str, request: &WireRequest) -> Result<WireResponse>;
}

/// Runs the decode → validate → handle → encode pipeline for `H`
pub(crate) struct TypedAdapter<H>(pub(crate) H);

impl<H: CommandHandler> ErasedHandler for TypedAdapter<H> {
    fn call(&self, command: &str, request: &WireRequest) -> Result<WireResponse> {
        let typed: H::Request = adapter::from_wire_request(command, request)?;
        validation::check(command, &typed)?;

        // The guard covers encoding as well as handling.
        catch_unwind(AssertUnwindSafe(|| match self.0.handle(typed) {
            Ok(payload) => adapter::to_wire_response(command, &TypedResponse::ok(payload)),
            Err(e) => Err(CmdError::Business {
                command: command.to_string(),
                message: e.message,
            }),
        }))
        .unwrap_or_else(|payload| {
            Err(CmdError::UnexpectedFault {
                command: command.to_string(),
                message: panic_message(payload.as_ref()),
            })
        })
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "handler panicked with a non-string payload".to_string()
    }
}
