//! Required-field validation
//!
//! Each request type declares its required fields as an ordered table. The
//! first absent field, in table order, is reported; nothing else is checked.

use crate::errors::{CmdError, Result};

/// One entry of a request's required-field table
pub struct RequiredField<T> {
    /// Name reported as `Missing /<label>`
    pub label: &'static str,
    /// Returns true when the field is present
    pub present: fn(&T) -> bool,
}

/// Implemented by every typed request
///
/// ```
/// use cmdbus_core::validation::{RequiredField, Validate};
///
/// struct Get {
///     name: Option<String>,
/// }
///
/// impl Validate for Get {
///     const REQUIRED: &'static [RequiredField<Self>] = &[RequiredField {
///         label: "name",
///         present: |r: &Get| r.name.is_some(),
///     }];
/// }
///
/// let missing = Get { name: None };
/// assert_eq!(cmdbus_core::validation::validate(&missing), Err("name"));
/// ```
pub trait Validate: Sized + 'static {
    /// Required fields in check order; empty by default
    const REQUIRED: &'static [RequiredField<Self>] = &[];
}

/// Return the label of the first missing required field
pub fn validate<T: Validate>(request: &T) -> std::result::Result<(), &'static str> {
    match T::REQUIRED.iter().find(|field| !(field.present)(request)) {
        Some(field) => Err(field.label),
        None => Ok(()),
    }
}

/// Validate on behalf of `command`, producing the dispatch error
pub fn check<T: Validate>(command: &str, request: &T) -> Result<()> {
    validate(request).map_err(|label| CmdError::MissingField {
        command: command.to_string(),
        field: label.to_string(),
    })
}
