//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. `RawPassword` is the
//! validated, zeroized user input; `UserPassword` is the Argon2id PHC
//! hash that is safe to persist.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::AccountError;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input.
///
/// Memory is automatically zeroized when dropped; `Clone` is not
/// implemented so copies cannot escape.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate user input against the password policy.
    ///
    /// Policy errors surface as field-scoped validation failures on
    /// `password`.
    pub fn new(raw: String) -> Result<Self, AccountError> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } => AccountError::validation(
                "password",
                "The password must be at least 8 characters.",
            ),
            PasswordPolicyError::TooLong { .. } => AccountError::validation(
                "password",
                "The password must not be greater than 128 characters.",
            ),
            PasswordPolicyError::EmptyOrWhitespace => {
                AccountError::validation("password", "The password field is required.")
            }
            PasswordPolicyError::InvalidCharacter => {
                AccountError::validation("password", "The password contains invalid characters.")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password.
    ///
    /// ## Arguments
    /// * `raw` - The validated raw password
    /// * `pepper` - Optional application-wide secret
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, AccountError> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AccountError::Internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AccountError::Internal("Unexpected error during password hashing".to_string())
            }
        })?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, AccountError> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AccountError::Internal("Invalid password hash in database".to_string()))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash.
    ///
    /// The pepper must match the one used during hashing. Comparison is
    /// constant-time inside the Argon2 implementation.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
