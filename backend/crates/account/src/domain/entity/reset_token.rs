//! Password Reset Token Entity
//!
//! Persisted, single-use secret tied to an email. The store keeps one row
//! per email; a new request supersedes the previous token. Expiry is a
//! fixed window from creation, enforced at consumption time.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::value_object::email::Email;
use platform::crypto::{constant_time_eq, random_secret, sha256};

/// Number of random bytes in the secret (256 bits)
const SECRET_BYTES: usize = 32;

/// Password reset token entity
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// Owning email (one authoritative token per email)
    pub email: Email,
    /// SHA-256 of the random secret
    pub token_hash: Vec<u8>,
    /// Created timestamp; the validity window starts here
    pub created_at: DateTime<Utc>,
}

impl ResetToken {
    /// Mint a reset token for an email.
    ///
    /// Returns the cleartext (mailed to the user) and the storable record.
    pub fn issue(email: Email) -> (String, Self) {
        let secret = random_secret(SECRET_BYTES);

        let token = Self {
            email,
            token_hash: sha256(secret.as_bytes()).to_vec(),
            created_at: Utc::now(),
        };

        (secret, token)
    }

    /// Constant-time check of a presented secret against the stored hash
    pub fn matches(&self, presented_secret: &str) -> bool {
        let presented_hash = sha256(presented_secret.as_bytes());
        constant_time_eq(&presented_hash, &self.token_hash)
    }

    /// True once the token's age has reached the validity window.
    ///
    /// The boundary counts as expired: a token is rejected at exactly
    /// `ttl` after creation.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Utc::now().signed_duration_since(self.created_at) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60 * 60);

    fn email() -> Email {
        Email::new("user@example.com").unwrap()
    }

    #[test]
    fn test_issue_and_match() {
        let (secret, token) = ResetToken::issue(email());

        assert_eq!(secret.len(), 43);
        assert!(token.matches(&secret));
        assert!(!token.matches("wrong-secret"));
    }

    #[test]
    fn test_fresh_token_not_expired() {
        let (_, token) = ResetToken::issue(email());
        assert!(!token.is_expired(TTL));
    }

    #[test]
    fn test_token_expired_at_window() {
        let (_, mut token) = ResetToken::issue(email());
        token.created_at = Utc::now() - chrono::Duration::minutes(60);
        assert!(token.is_expired(TTL));
    }

    #[test]
    fn test_token_valid_just_before_window() {
        let (_, mut token) = ResetToken::issue(email());
        token.created_at = Utc::now() - chrono::Duration::minutes(59);
        assert!(!token.is_expired(TTL));
    }

    #[test]
    fn test_two_tokens_are_independent() {
        let (secret_a, token_a) = ResetToken::issue(email());
        let (secret_b, token_b) = ResetToken::issue(email());

        assert!(!token_a.matches(&secret_b));
        assert!(!token_b.matches(&secret_a));
    }
}
