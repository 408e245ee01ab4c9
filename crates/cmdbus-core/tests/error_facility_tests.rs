use cmdbus_core::errors::{CmdError, ExError, ExErrorKind};

#[test]
fn test_missing_field_verifiable_by_kind() {
    let err = CmdError::MissingField {
        command: "metrics/enable".to_string(),
        field: "status".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_eq!(ex_err.code(), "ERR_MISSING_FIELD");
    assert_eq!(ex_err.command(), Some("metrics/enable"));
    assert_eq!(ex_err.op(), Some("validate"));
    assert_eq!(ex_err.message(), "Missing /status");
}

#[test]
fn test_business_distinct_from_fault() {
    let business: ExError = CmdError::Business {
        command: "metrics/enable".to_string(),
        message: "no such scope".to_string(),
    }
    .into();
    let fault: ExError = CmdError::UnexpectedFault {
        command: "metrics/enable".to_string(),
        message: "index out of bounds".to_string(),
    }
    .into();

    assert_eq!(business.kind(), ExErrorKind::Business);
    assert_eq!(fault.kind(), ExErrorKind::UnexpectedFault);
    assert_ne!(business.code(), fault.code());
}

#[test]
fn test_invalid_request_has_no_command() {
    let ex_err: ExError = CmdError::InvalidRequest {
        reason: "EOF while parsing".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidRequest);
    assert!(ex_err.command().is_none());
    assert!(ex_err.message().contains("EOF while parsing"));
}

#[test]
fn test_registration_errors_are_startup_only() {
    let dup: ExError = CmdError::DuplicateCommand {
        command: "metrics/dump".to_string(),
    }
    .into();
    let reg: ExError = CmdError::Registration {
        command: "metrics/dump".to_string(),
        reason: "factory failed".to_string(),
    }
    .into();

    assert!(dup.kind().is_startup_only());
    assert!(reg.kind().is_startup_only());
    assert_eq!(dup.op(), Some("register"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidRequest, "ERR_INVALID_REQUEST"),
        (ExErrorKind::UnknownCommand, "ERR_UNKNOWN_COMMAND"),
        (ExErrorKind::Decode, "ERR_DECODE"),
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::Encode, "ERR_ENCODE"),
        (ExErrorKind::Business, "ERR_BUSINESS"),
        (ExErrorKind::UnexpectedFault, "ERR_UNEXPECTED_FAULT"),
        (ExErrorKind::DuplicateCommand, "ERR_DUPLICATE_COMMAND"),
        (ExErrorKind::Registration, "ERR_REGISTRATION"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_display_format() {
    let ex_err: ExError = CmdError::UnknownCommand {
        command: "metrics/reset".to_string(),
    }
    .into();

    assert_eq!(
        ex_err.to_string(),
        "[ERR_UNKNOWN_COMMAND] in operation 'dispatch': Command \"metrics/reset\" not found (command: metrics/reset)"
    );
}

#[test]
fn test_std_error_source_chain() {
    use std::error::Error;

    let inner: ExError = CmdError::DuplicateCommand {
        command: "metrics/dump".to_string(),
    }
    .into();
    let outer = ExError::new(ExErrorKind::Registration)
        .with_message("metrics API commands could not be registered")
        .with_source(inner);

    let source = outer.source().expect("source must be exposed");
    assert!(source.to_string().contains("ERR_DUPLICATE_COMMAND"));
    assert_eq!(
        outer.source_error().map(ExError::kind),
        Some(ExErrorKind::DuplicateCommand)
    );
}
