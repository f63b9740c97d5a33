//! Signed Verification Link Codec
//!
//! Pure functions that derive and check a tamper-evident, expiring email
//! verification link. Nothing is persisted: the link is a deterministic
//! function of (user id, the user's *current* email, server key, expiry),
//! so changing the account email silently invalidates outstanding links.
//!
//! Link shape: `/email/verify/{user_id}/{hash}?expires={ts}&signature={sig}`
//! - `hash`      = hex(HMAC-SHA256(key, SHA-256(email)))
//! - `signature` = hex(HMAC-SHA256(key, "{user_id}/{hash}?expires={ts}"))
//!
//! The outer signature covers the expiry, so the timestamp travels in the
//! URL without being forgeable.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use platform::crypto::{constant_time_eq, sha256, to_hex};

type HmacSha256 = Hmac<Sha256>;

/// A generated verification link, ready to be rendered into a URL
#[derive(Debug, Clone)]
pub struct VerificationLink {
    pub user_id: Uuid,
    pub hash: String,
    pub expires_at: i64,
    pub signature: String,
}

impl VerificationLink {
    /// Render the path-and-query part of the link
    pub fn relative_url(&self) -> String {
        format!(
            "/api/email/verify/{}/{}?expires={}&signature={}",
            self.user_id, self.hash, self.expires_at, self.signature
        )
    }
}

/// Outcome of checking a presented link against the recomputed values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// Signature and hash match, link is within its window
    Valid,
    /// Signature and hash match but the window has passed
    Expired,
    /// Presented values do not match the recomputation
    Mismatch,
}

/// Derive a verification link for a user's current email.
///
/// `expires_at` is absolute; the caller computes `now + ttl`.
pub fn generate(
    key: &[u8; 32],
    user_id: Uuid,
    email: &str,
    expires_at: DateTime<Utc>,
) -> VerificationLink {
    let expires_at = expires_at.timestamp();
    let hash = email_hash(key, email);
    let signature = outer_signature(key, user_id, &hash, expires_at);

    VerificationLink {
        user_id,
        hash,
        expires_at,
        signature,
    }
}

/// Check a presented link against the user's current email.
///
/// Mismatch is reported before expiry so a tampered expiry on a forged
/// link never reads as merely "expired". All comparisons are
/// constant-time over equal-length hex strings.
pub fn verify(
    key: &[u8; 32],
    user_id: Uuid,
    email: &str,
    presented_hash: &str,
    expires_at: i64,
    presented_signature: &str,
    now: DateTime<Utc>,
) -> LinkCheck {
    let expected_hash = email_hash(key, email);
    let expected_signature = outer_signature(key, user_id, &expected_hash, expires_at);

    let hash_ok = constant_time_eq(expected_hash.as_bytes(), presented_hash.as_bytes());
    let signature_ok =
        constant_time_eq(expected_signature.as_bytes(), presented_signature.as_bytes());

    if !hash_ok || !signature_ok {
        return LinkCheck::Mismatch;
    }

    if now.timestamp() >= expires_at {
        return LinkCheck::Expired;
    }

    LinkCheck::Valid
}

/// HMAC over a one-way digest of the email address
fn email_hash(key: &[u8; 32], email: &str) -> String {
    let digest = sha256(email.as_bytes());
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(&digest);
    to_hex(&mac.finalize().into_bytes())
}

/// HMAC over the canonical path-and-expiry string
fn outer_signature(key: &[u8; 32], user_id: Uuid, hash: &str, expires_at: i64) -> String {
    let payload = format!("{}/{}?expires={}", user_id, hash, expires_at);
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    to_hex(&mac.finalize().into_bytes())
}
