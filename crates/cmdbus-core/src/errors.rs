use thiserror::Error;

/// Result type alias using CmdError
pub type Result<T> = std::result::Result<T, CmdError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests and external callers can
/// match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Envelope / routing
    InvalidRequest,
    UnknownCommand,

    // Per-command adapter stages
    Decode,
    MissingField,
    Encode,

    // Handler outcomes
    Business,
    UnexpectedFault,

    // Startup
    DuplicateCommand,
    Registration,

    // Configuration / host
    Config,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidRequest => "ERR_INVALID_REQUEST",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::Encode => "ERR_ENCODE",
            ExErrorKind::Business => "ERR_BUSINESS",
            ExErrorKind::UnexpectedFault => "ERR_UNEXPECTED_FAULT",
            ExErrorKind::DuplicateCommand => "ERR_DUPLICATE_COMMAND",
            ExErrorKind::Registration => "ERR_REGISTRATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }

    /// Whether this kind may only occur while the registry is being built
    pub fn is_startup_only(&self) -> bool {
        matches!(
            self,
            ExErrorKind::DuplicateCommand | ExErrorKind::Registration
        )
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context
/// (operation, command) for logs.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    command: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            command: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add command name context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the command context, if any
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(command) = &self.command {
            write!(f, " (command: {})", command)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for the command adapter
///
/// Every variant except `DuplicateCommand` and `Registration` is turned into
/// an error response at the registry boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CmdError {
    /// The transport envelope itself could not be parsed
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// No handler is registered under the routing key
    #[error("Command \"{command}\" not found")]
    UnknownCommand { command: String },

    /// Parameters do not match the command's declared request shape
    #[error("Invalid parameters for '{command}': {reason}")]
    Decode { command: String, reason: String },

    /// A required field is absent
    #[error("Missing /{field}")]
    MissingField { command: String, field: String },

    /// The typed response could not be represented on the wire
    #[error("Failed to encode response for '{command}': {reason}")]
    Encode { command: String, reason: String },

    /// Expected failure reported by a handler
    #[error("{message}")]
    Business { command: String, message: String },

    /// A handler panicked
    #[error("{message}")]
    UnexpectedFault { command: String, message: String },

    /// A name was registered twice
    #[error("Command \"{command}\" is already registered")]
    DuplicateCommand { command: String },

    /// A handler could not be constructed or its name is unusable
    #[error("Command \"{command}\" could not be registered: {reason}")]
    Registration { command: String, reason: String },
}

impl CmdError {
    /// The command this error is attributed to, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            CmdError::InvalidRequest { .. } => None,
            CmdError::UnknownCommand { command }
            | CmdError::Decode { command, .. }
            | CmdError::MissingField { command, .. }
            | CmdError::Encode { command, .. }
            | CmdError::Business { command, .. }
            | CmdError::UnexpectedFault { command, .. }
            | CmdError::DuplicateCommand { command }
            | CmdError::Registration { command, .. } => Some(command),
        }
    }
}

impl From<CmdError> for ExError {
    fn from(err: CmdError) -> Self {
        let message = err.to_string();
        let (kind, op) = match &err {
            CmdError::InvalidRequest { .. } => (ExErrorKind::InvalidRequest, "parse_request"),
            CmdError::UnknownCommand { .. } => (ExErrorKind::UnknownCommand, "dispatch"),
            CmdError::Decode { .. } => (ExErrorKind::Decode, "decode"),
            CmdError::MissingField { .. } => (ExErrorKind::MissingField, "validate"),
            CmdError::Encode { .. } => (ExErrorKind::Encode, "encode"),
            CmdError::Business { .. } => (ExErrorKind::Business, "handle"),
            CmdError::UnexpectedFault { .. } => (ExErrorKind::UnexpectedFault, "handle"),
            CmdError::DuplicateCommand { .. } => (ExErrorKind::DuplicateCommand, "register"),
            CmdError::Registration { .. } => (ExErrorKind::Registration, "register"),
        };

        let ex = ExError::new(kind).with_op(op).with_message(message);
        match err.command() {
            Some(command) => ex.with_command(command),
            None => ex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_format() {
        let err = CmdError::MissingField {
            command: "metrics/enable".to_string(),
            field: "status".to_string(),
        };
        assert_eq!(err.to_string(), "Missing /status");
    }

    #[test]
    fn test_business_message_is_verbatim() {
        let err = CmdError::Business {
            command: "metrics/enable".to_string(),
            message: "Scope 'core' not found".to_string(),
        };
        assert_eq!(err.to_string(), "Scope 'core' not found");
    }

    #[test]
    fn test_startup_only_kinds() {
        assert!(ExErrorKind::DuplicateCommand.is_startup_only());
        assert!(ExErrorKind::Registration.is_startup_only());
        assert!(!ExErrorKind::UnknownCommand.is_startup_only());
        assert!(!ExErrorKind::UnexpectedFault.is_startup_only());
    }

    #[test]
    fn test_display_includes_source_chain() {
        let inner = ExError::new(ExErrorKind::DuplicateCommand).with_message("dup");
        let outer = ExError::new(ExErrorKind::Registration)
            .with_message("metrics API commands could not be registered")
            .with_source(inner);

        let rendered = outer.to_string();
        assert!(rendered.starts_with("[ERR_REGISTRATION]"));
        assert!(rendered.contains("<- [ERR_DUPLICATE_COMMAND]: dup"));
    }
}
