//! Field-level validation errors
//!
//! Flattens `validator` failures into `{field, message}` pairs that both the
//! API server and the client report to their callers.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Flattens `errors` into one entry per failed check, sorted by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Runs `payload.validate()` and flattens any failures
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), Vec<FieldError>> {
    payload.validate().map_err(|e| field_errors(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoginPayload;

    #[test]
    fn test_validate_payload_collects_messages() {
        let payload = LoginPayload {
            email: "not-an-email".to_string(),
            password_hash: String::new(),
        };

        let errors = validate_payload(&payload).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Invalid email format");
        assert_eq!(errors[1].field, "password_hash");
    }

    #[test]
    fn test_validate_payload_ok() {
        let payload = LoginPayload {
            email: "alice@example.com".to_string(),
            password_hash: "password".to_string(),
        };

        assert!(validate_payload(&payload).is_ok());
    }
}
