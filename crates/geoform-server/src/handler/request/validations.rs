//! Request validation utilities.

use validator::ValidationError;

/// Creates a [`ValidationError`] with a human-readable message attached.
pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_code_and_message() {
        let error = validation_error("slug_format", "Only lowercase allowed");
        assert_eq!(error.code, "slug_format");
        assert_eq!(error.message.as_deref(), Some("Only lowercase allowed"));
    }
}
