pub mod applications;
pub mod appointments;
pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod donations;
pub mod favorites;
pub mod feedback;
pub mod medical;
pub mod pets;
pub mod profile;
pub mod store;
pub mod volunteers;

use crate::error::{AppError, AppResult};

/// Rejects missing or whitespace-only text fields.
pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: i64) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("name", "Max").is_ok());
        let err = require_text("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: name is required");
    }

    #[test]
    fn negative_numbers_are_rejected() {
        assert!(require_non_negative("stock", 0).is_ok());
        assert!(require_non_negative("stock", -1).is_err());
    }
}
