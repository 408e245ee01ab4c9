//! Canonical schema constants for structured logging
//!
//! Log macros and the dispatch span use these keys so that captured events
//! can be filtered the same way in tests and in production sinks.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Dispatch identifiers
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_ORIGIN: &str = "origin";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
