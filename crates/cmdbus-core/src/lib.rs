//! cmdbus core - typed command registry
//!
//! Routes command-agnostic wire requests to strongly-typed handlers:
//! - Wire envelope (`wire`) and typed codec (`adapter`)
//! - Declarative required-field checks (`validation`)
//! - Handler trait and closure adapter (`handler`)
//! - Uniform error responses (`translator`)
//! - Startup-time registration and lock-free dispatch (`registry`)
//! - Error and logging facilities shared by every crate in the workspace

pub mod adapter;
pub mod errors;
pub mod handler;
pub mod logging_facility;
pub mod registry;
pub mod translator;
pub mod validation;
pub mod wire;

pub use cmdbus_core_types::schema;

// Re-export commonly used types
pub use adapter::{Empty, JsonText, ReturnStatus, TypedResponse};
pub use errors::{CmdError, ExError, ExErrorKind, Result};
pub use handler::{handler_fn, BusinessError, CommandHandler, HandlerResult};
pub use registry::{Registry, RegistryBuilder};
pub use validation::{RequiredField, Validate};
pub use wire::{ResponseCode, WireRequest, WireResponse};
