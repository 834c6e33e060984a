//! Card number checks run before anything is sent upstream.
//!
//! Surrounding whitespace is deliberately removed; what remains is passed to
//! the portal verbatim. Empty input, control characters and oversized values
//! are rejected.

use crate::error::BipCardError;

pub const MAX_CARD_NUMBER_LENGTH: usize = 64;

/// Checks a caller-supplied card number and returns the trimmed value.
pub fn validate_card_number(input: &str) -> Result<String, BipCardError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BipCardError::InvalidInput(
            "card number is required".to_string(),
        ));
    }
    if trimmed.len() > MAX_CARD_NUMBER_LENGTH {
        return Err(BipCardError::InvalidInput(format!(
            "card number exceeds maximum length of {} bytes",
            MAX_CARD_NUMBER_LENGTH
        )));
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(BipCardError::InvalidInput(
            "card number contains control characters".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
