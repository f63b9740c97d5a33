//! Access Token Entity
//!
//! Bearer session credential. The random secret exists in cleartext only
//! in the issuance response; the store keeps a SHA-256 lookup hash.
//!
//! Cleartext wire format: `{token_id}|{secret}`. Carrying the id lets
//! authentication fetch one row by primary key and then compare hashes in
//! constant time, instead of querying by a secret-derived value.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::value_object::user_id::UserId;
use platform::crypto::{constant_time_eq, random_secret, sha256};

/// Number of random bytes in the secret (256 bits)
const SECRET_BYTES: usize = 32;

/// Access token entity
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Token ID (UUID v4), embedded in the cleartext for lookup
    pub token_id: Uuid,
    /// Owning user
    pub user_id: UserId,
    /// Label given at issuance (e.g. `auth_token`)
    pub name: String,
    /// SHA-256 of the random secret
    pub token_hash: Vec<u8>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last successful authentication with this token
    pub last_used_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Mint a new token for a user.
    ///
    /// Returns the cleartext exactly once together with the storable
    /// record. No limit on concurrent tokens per user.
    pub fn issue(user_id: UserId, name: impl Into<String>) -> (String, Self) {
        let token_id = Uuid::new_v4();
        let secret = random_secret(SECRET_BYTES);

        let token = Self {
            token_id,
            user_id,
            name: name.into(),
            token_hash: sha256(secret.as_bytes()).to_vec(),
            created_at: Utc::now(),
            last_used_at: None,
        };

        (format!("{}|{}", token_id, secret), token)
    }

    /// Constant-time check of a presented secret against the stored hash
    pub fn matches(&self, presented_secret: &str) -> bool {
        let presented_hash = sha256(presented_secret.as_bytes());
        constant_time_eq(&presented_hash, &self.token_hash)
    }

    /// Record a successful authentication
    pub fn touch(&mut self) {
        self.last_used_at = Some(Utc::now());
    }
}

/// Split a presented cleartext token into `(token_id, secret)`.
///
/// Returns `None` for any malformed input; the caller maps that to the
/// same response as an unknown token.
pub fn split_cleartext(token: &str) -> Option<(Uuid, &str)> {
    let (id_part, secret) = token.split_once('|')?;
    let token_id = id_part.parse().ok()?;
    if secret.is_empty() {
        return None;
    }
    Some((token_id, secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_format() {
        let (cleartext, token) = AccessToken::issue(UserId::new(), "auth_token");

        let (token_id, secret) = split_cleartext(&cleartext).unwrap();
        assert_eq!(token_id, token.token_id);
        assert_eq!(secret.len(), 43); // 32 bytes base64url, no padding
        assert_eq!(token.token_hash.len(), 32);
        assert!(token.last_used_at.is_none());
    }

    #[test]
    fn test_matches_own_secret_only() {
        let (cleartext, token) = AccessToken::issue(UserId::new(), "auth_token");
        let (_, secret) = split_cleartext(&cleartext).unwrap();

        assert!(token.matches(secret));
        assert!(!token.matches("not-the-secret"));
        assert!(!token.matches(""));
    }

    #[test]
    fn test_two_tokens_do_not_collide() {
        let user_id = UserId::new();
        let (clear_a, token_a) = AccessToken::issue(user_id, "auth_token");
        let (clear_b, token_b) = AccessToken::issue(user_id, "auth_token");

        let (_, secret_a) = split_cleartext(&clear_a).unwrap();
        let (_, secret_b) = split_cleartext(&clear_b).unwrap();

        assert!(!token_a.matches(secret_b));
        assert!(!token_b.matches(secret_a));
        assert_ne!(token_a.token_id, token_b.token_id);
    }

    #[test]
    fn test_split_cleartext_malformed() {
        assert!(split_cleartext("").is_none());
        assert!(split_cleartext("no-separator").is_none());
        assert!(split_cleartext("not-a-uuid|secret").is_none());
        assert!(split_cleartext(&format!("{}|", Uuid::new_v4())).is_none());
    }
}
