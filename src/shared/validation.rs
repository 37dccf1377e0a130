//! Validation Utilities

use validator::{Validate, ValidationErrors};

use super::error::AppError;

/// Run `validator` derive rules and convert failures into `AppError::Validation`.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(validation_error)
}

/// Convert validation errors to AppError, naming every offending field
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => format!("{}: {}", field, m),
                None => format!("{}: invalid value", field),
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        AppError::Validation("Validation failed".into())
    } else {
        AppError::Validation(messages.join("; "))
    }
}
