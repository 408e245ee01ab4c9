//! Command registry and dispatch
//!
//! Registration happens on a `RegistryBuilder` during startup. `build()`
//! freezes the name → handler map into a `Registry`, which has no mutating
//! methods and can be shared as `Arc<Registry>` across dispatching threads
//! without a lock.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use cmdbus_core_types::RequestId;
use tracing::{debug, info_span};

use crate::errors::{CmdError, Result};
use crate::handler::{CommandHandler, ErasedHandler, TypedAdapter};
use crate::translator::error_response;
use crate::wire::{WireRequest, WireResponse};
use crate::{log_op_end, log_op_error, log_op_start};

/// Registration phase
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, Box<dyn ErasedHandler>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`
    ///
    /// # Errors
    ///
    /// `DuplicateCommand` if `name` is taken, `Registration` if `name` is
    /// empty or contains whitespace.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> Result<()>
    where
        H: CommandHandler,
    {
        let name = name.into();
        self.check_name(&name)?;
        debug!(registered = %name, "registered command");
        self.handlers.insert(name, Box::new(TypedAdapter(handler)));
        Ok(())
    }

    /// Register the handler produced by a fallible factory
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register), plus `Registration` carrying the
    /// factory's error text.
    pub fn register_with<H, F, E>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        H: CommandHandler,
        F: FnOnce() -> std::result::Result<H, E>,
        E: fmt::Display,
    {
        let name = name.into();
        self.check_name(&name)?;
        let handler = factory().map_err(|e| CmdError::Registration {
            command: name.clone(),
            reason: e.to_string(),
        })?;
        self.register(name, handler)
    }

    /// Whether `name` has been registered so far
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Freeze the registry
    pub fn build(self) -> Registry {
        Registry {
            handlers: self.handlers,
        }
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(CmdError::Registration {
                command: name.to_string(),
                reason: "command names must be non-empty and contain no whitespace".to_string(),
            });
        }
        if self.handlers.contains_key(name) {
            return Err(CmdError::DuplicateCommand {
                command: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Frozen name → handler map
pub struct Registry {
    handlers: HashMap<String, Box<dyn ErasedHandler>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Dispatch a request by its `command` routing key
    ///
    /// The envelope is checked first, so requests built in code are held to
    /// the same version rule as parsed ones. Never panics on behalf of a
    /// handler; every failure is returned as an error response.
    pub fn dispatch(&self, request: &WireRequest) -> WireResponse {
        self.dispatch_with_id(RequestId::new(), request)
    }

    /// Dispatch with a caller-supplied correlation id
    pub fn dispatch_with_id(&self, request_id: RequestId, request: &WireRequest) -> WireResponse {
        let command = request.command.as_str();
        let span = info_span!("dispatch", request_id = %request_id, command = command);
        let _enter = span.enter();

        let origin = request
            .origin
            .as_ref()
            .map(|o| format!("{}/{}", o.module, o.name))
            .unwrap_or_default();
        log_op_start!("dispatch", origin = origin.as_str());
        let started = Instant::now();

        let result = request
            .check()
            .and_then(|()| match self.handlers.get(command) {
                Some(handler) => handler.call(command, request),
                None => Err(CmdError::UnknownCommand {
                    command: command.to_string(),
                }),
            });
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                log_op_end!("dispatch", duration_ms = duration_ms);
                response
            }
            Err(err) => {
                let response = error_response(&err);
                log_op_error!("dispatch", err, duration_ms = duration_ms);
                response
            }
        }
    }

    /// Parse a raw JSON envelope and dispatch it
    pub fn dispatch_json(&self, raw: &str) -> WireResponse {
        match WireRequest::from_json(raw) {
            Ok(request) => self.dispatch(&request),
            Err(err) => {
                let response = error_response(&err);
                log_op_error!("parse_request", err, duration_ms = 0_u64);
                response
            }
        }
    }

    /// Dispatch one raw line from a byte-oriented transport
    ///
    /// Input that is not UTF-8 is answered with an invalid-request response.
    pub fn dispatch_bytes(&self, raw: &[u8]) -> WireResponse {
        match std::str::from_utf8(raw) {
            Ok(text) => self.dispatch_json(text),
            Err(e) => {
                let err = CmdError::InvalidRequest {
                    reason: format!("request is not valid UTF-8: {}", e),
                };
                let response = error_response(&err);
                log_op_error!("parse_request", err, duration_ms = 0_u64);
                response
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands())
            .finish()
    }
}
