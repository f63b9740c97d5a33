//! Phone Number Value Object
//!
//! Delegates format checking to `platform::phone`. UK-shaped numbers are
//! validated strictly; anything else passes through after the length cap.

use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Maximum accepted length of the raw input
const PHONE_MAX_LENGTH: usize = 20;

/// Validated contact phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and wrap a phone number, keeping the caller's formatting.
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(AccountError::validation(
                "contact_number",
                "The contact number field is required.",
            ));
        }

        if trimmed.len() > PHONE_MAX_LENGTH {
            return Err(AccountError::validation(
                "contact_number",
                format!(
                    "The contact number must not be greater than {} characters.",
                    PHONE_MAX_LENGTH
                ),
            ));
        }

        platform::phone::validate_uk_phone(trimmed, "contact_number")
            .map_err(|e| AccountError::validation("contact_number", e.to_string()))?;

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
