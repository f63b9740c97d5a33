//! Email Verification Use Cases
//!
//! `SendVerificationUseCase` renders a signed link into a mail;
//! `VerifyEmailUseCase` consumes a presented link. Verification is a
//! small state machine with explicit terminal outcomes so the caller has
//! to handle every case and "already verified" never re-fires the
//! verified event.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::User;
use crate::domain::mailer::Mailer;
use crate::domain::repository::UserRepository;
use crate::domain::signed_link::{self, LinkCheck};
use crate::error::{AccountError, AccountResult};

/// Terminal outcomes of consuming a verification link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Email was just verified; the verified event fired exactly once
    Verified,
    /// The user had already verified; nothing happened
    AlreadyVerified,
    /// No account for the presented user id
    UserNotFound,
    /// Signature or hash did not match the recomputed values
    Mismatch,
    /// Link authentic but past its expiry window
    Expired,
}

/// A presented verification link, as decoded from the request
pub struct VerifyLinkInput {
    pub user_id: Uuid,
    pub hash: String,
    pub expires: i64,
    pub signature: String,
}

// ============================================================================
// Send (registration + resend)
// ============================================================================

/// Send verification mail use case
pub struct SendVerificationUseCase<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    config: Arc<AccountConfig>,
}

impl<M> SendVerificationUseCase<M>
where
    M: Mailer,
{
    pub fn new(mailer: Arc<M>, config: Arc<AccountConfig>) -> Self {
        Self { mailer, config }
    }

    /// Generate a fresh signed link for the user's current email and mail it
    pub async fn execute(&self, user: &User) -> AccountResult<()> {
        if user.has_verified_email() {
            return Err(AccountError::AlreadyVerified);
        }

        let ttl = Duration::from_std(self.config.verification_link_ttl)
            .map_err(|e| AccountError::Internal(format!("Invalid verification TTL: {e}")))?;

        let link = signed_link::generate(
            &self.config.app_key,
            *user.user_id.as_uuid(),
            user.email.as_str(),
            Utc::now() + ttl,
        );

        let verify_url = format!(
            "{}{}",
            self.config.app_url.trim_end_matches('/'),
            link.relative_url()
        );

        self.mailer
            .send_verification(&user.email, &user.name, &verify_url)
            .await?;

        tracing::info!(user_id = %user.user_id, "Verification email sent");
        Ok(())
    }
}

// ============================================================================
// Verify (link consumption)
// ============================================================================

/// Verify email use case
pub struct VerifyEmailUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> VerifyEmailUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: VerifyLinkInput) -> AccountResult<VerifyOutcome> {
        let user_id = input.user_id.into();

        let Some(mut user) = self.user_repo.find_by_id(&user_id).await? else {
            return Ok(VerifyOutcome::UserNotFound);
        };

        // Terminal state, checked before any signature work: a repeat
        // visit must not re-fire the verified event.
        if user.has_verified_email() {
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        // Recomputed from the *current* email; a changed address makes
        // outstanding links fail here.
        let check = signed_link::verify(
            &self.config.app_key,
            input.user_id,
            user.email.as_str(),
            &input.hash,
            input.expires,
            &input.signature,
            Utc::now(),
        );

        match check {
            LinkCheck::Mismatch => Ok(VerifyOutcome::Mismatch),
            LinkCheck::Expired => Ok(VerifyOutcome::Expired),
            LinkCheck::Valid => {
                if user.mark_email_verified() {
                    self.user_repo.update(&user).await?;
                    // The one-time verified event
                    tracing::info!(user_id = %user.user_id, "Email verified");
                }
                Ok(VerifyOutcome::Verified)
            }
        }
    }
}
