//! Helpers shared by every validated request type.

use validator::ValidationErrors;

use crate::errors::{AppError, FieldError};

/// Input clean-up applied before validation runs.
///
/// Implementors rewrite fields into their canonical form (case folding,
/// trimming) so the rules in [`validator::Validate`] only ever see
/// normalized data.
pub trait Normalize {
    fn normalize(self) -> Self;
}

/// Flattens [`ValidationErrors`] into one [`FieldError`] per violated rule,
/// sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

impl AppError {
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        AppError::validation(field_errors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use validator::ValidationError;

    #[test]
    fn test_field_errors_uses_message_or_fallback() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "grade",
            ValidationError::new("range").with_message("Grade must be between 1 and 12".into()),
        );
        errors.add("class_code", ValidationError::new("length"));

        let details = field_errors(&errors);
        assert_eq!(
            details,
            vec![
                FieldError::new("class_code", "class_code is invalid"),
                FieldError::new("grade", "Grade must be between 1 and 12"),
            ]
        );
    }

    #[test]
    fn test_validation_errors_convert_to_app_error() {
        let mut errors = ValidationErrors::new();
        errors.add("last_name", ValidationError::new("length"));

        let err = AppError::from_validation(&errors);
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.details.len(), 1);
    }
}
