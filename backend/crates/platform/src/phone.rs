//! Phone Number Format Validation
//!
//! A lenient predicate: UK-shaped numbers (leading `0`, `44`, or `+44`)
//! must match the UK national numbering plan length; everything else is
//! accepted unchanged so international users are not locked out.

use thiserror::Error;

/// UK phone format violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The {field} must be a valid UK phone number format.")]
pub struct PhoneFormatError {
    /// Name of the offending input field, for field-scoped error responses
    pub field: &'static str,
}

/// Validate a phone number's format.
///
/// Whitespace, hyphens, and parentheses are stripped before checking.
/// Accepted UK shapes after cleaning:
/// - `0` followed by exactly 10 digits (domestic, 11 digits total)
/// - `44` or `+44` followed by exactly 10 digits (international)
///
/// Input that does not start with `0`, `44`, or `+44` is treated as a
/// non-UK number and accepted; length/type rules apply elsewhere.
pub fn validate_uk_phone(raw: &str, field: &'static str) -> Result<(), PhoneFormatError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '(' && *c != ')')
        .collect();

    let rest = if let Some(rest) = cleaned.strip_prefix("+44") {
        rest
    } else if let Some(rest) = cleaned.strip_prefix("44") {
        rest
    } else if let Some(rest) = cleaned.strip_prefix('0') {
        rest
    } else {
        // Not a UK number, skip UK-specific validation
        return Ok(());
    };

    if rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()) {
        return Ok(());
    }

    Err(PhoneFormatError { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(raw: &str) -> Result<(), PhoneFormatError> {
        validate_uk_phone(raw, "contact_number")
    }

    #[test]
    fn test_valid_domestic() {
        assert!(check("07911123456").is_ok());
        assert!(check("07911 123 456").is_ok());
        assert!(check("(079) 1112-3456").is_ok());
    }

    #[test]
    fn test_valid_international() {
        assert!(check("+447911123456").is_ok());
        assert!(check("447911123456").is_ok());
        assert!(check("+44 7911 123456").is_ok());
    }

    #[test]
    fn test_domestic_wrong_length() {
        // 0 followed by only 9 digits
        assert!(check("0791112345").is_err());
        // 0 followed by 11 digits
        assert!(check("079111234567").is_err());
    }

    #[test]
    fn test_international_wrong_length() {
        // 44 followed by only 9 digits
        assert!(check("44791112345").is_err());
        assert!(check("+44791112345").is_err());
    }

    #[test]
    fn test_non_uk_accepted() {
        // No UK prefix: accepted regardless of shape
        assert!(check("123456").is_ok());
        assert!(check("+15551234567").is_ok());
        assert!(check("5551234").is_ok());
    }

    #[test]
    fn test_uk_prefix_with_letters() {
        assert!(check("07911abc456").is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = check("0791112345").unwrap_err();
        assert_eq!(err.field, "contact_number");
        assert!(err.to_string().contains("contact_number"));
    }
}
