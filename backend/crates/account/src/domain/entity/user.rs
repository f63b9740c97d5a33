//! User Entity
//!
//! Identity and credential record. The email-verified timestamp is set
//! exactly once by the verification flow and never cleared afterwards.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, phone_number::PhoneNumber, user_id::UserId, user_password::UserPassword,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Unique, case-normalized email address
    pub email: Email,
    /// Argon2id password hash (never empty once the account exists)
    pub password_hash: UserPassword,
    /// When the email was verified; `None` until the signed link is consumed
    pub email_verified_at: Option<DateTime<Utc>>,
    /// Contact phone number
    pub contact_number: Option<PhoneNumber>,
    /// Storage path of the profile image
    pub profile_image: Option<String>,
    /// Long-lived session marker, rotated on password reset
    pub remember_token: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new unverified user
    pub fn new(
        name: String,
        email: Email,
        password_hash: UserPassword,
        contact_number: Option<PhoneNumber>,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            email_verified_at: None,
            contact_number,
            profile_image: None,
            remember_token: generate_remember_token(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the email has been verified
    pub fn has_verified_email(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Record email verification.
    ///
    /// Returns `false` without touching the timestamp if already verified,
    /// so the caller can avoid re-firing the verified notification.
    pub fn mark_email_verified(&mut self) -> bool {
        if self.has_verified_email() {
            return false;
        }
        let now = Utc::now();
        self.email_verified_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Replace the password hash (registration already set one; this is
    /// the reset path)
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Rotate the long-lived session marker
    pub fn rotate_remember_token(&mut self) {
        self.remember_token = generate_remember_token();
        self.updated_at = Utc::now();
    }

    /// Replace the profile image path, returning the previous one so the
    /// caller can delete the old object
    pub fn set_profile_image(&mut self, path: Option<String>) -> Option<String> {
        let previous = self.profile_image.take();
        self.profile_image = path;
        self.updated_at = Utc::now();
        previous
    }
}

/// 60-character random marker (45 random bytes, base64url)
fn generate_remember_token() -> String {
    platform::crypto::random_secret(45)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn sample_user() -> User {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hash = UserPassword::from_raw(&raw, None).unwrap();
        User::new(
            "Test User".to_string(),
            Email::new("user@example.com").unwrap(),
            hash,
            None,
        )
    }

    #[test]
    fn test_new_user_is_unverified() {
        let user = sample_user();
        assert!(!user.has_verified_email());
        assert_eq!(user.remember_token.len(), 60);
    }

    #[test]
    fn test_mark_email_verified_once() {
        let mut user = sample_user();

        assert!(user.mark_email_verified());
        let first = user.email_verified_at;
        assert!(first.is_some());

        // Second call reports already-verified and keeps the timestamp
        assert!(!user.mark_email_verified());
        assert_eq!(user.email_verified_at, first);
    }

    #[test]
    fn test_rotate_remember_token() {
        let mut user = sample_user();
        let before = user.remember_token.clone();
        user.rotate_remember_token();
        assert_ne!(user.remember_token, before);
        assert_eq!(user.remember_token.len(), 60);
    }

    #[test]
    fn test_set_profile_image_returns_previous() {
        let mut user = sample_user();
        assert_eq!(user.set_profile_image(Some("a.jpg".to_string())), None);
        assert_eq!(
            user.set_profile_image(Some("b.jpg".to_string())),
            Some("a.jpg".to_string())
        );
        assert_eq!(user.profile_image.as_deref(), Some("b.jpg"));
    }
}
