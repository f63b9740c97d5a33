//! Password Reset Use Cases
//!
//! `RequestResetUseCase` answers identically whether or not the email is
//! registered; `CompleteResetUseCase` consumes a token exactly once.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::reset_token::ResetToken;
use crate::domain::mailer::Mailer;
use crate::domain::repository::{ResetTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AccountError, AccountResult};

/// Terminal outcomes of a reset attempt. Callers must handle every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStatus {
    /// Password replaced, token(s) consumed, remember marker rotated
    Success,
    /// No stored token matched, or the matching token had expired
    InvalidToken,
    /// No account for the presented email
    InvalidUser,
}

// ============================================================================
// Request (forgot-password)
// ============================================================================

/// Request reset use case
pub struct RequestResetUseCase<U, R, M>
where
    U: UserRepository,
    R: ResetTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    reset_repo: Arc<R>,
    mailer: Arc<M>,
}

impl<U, R, M> RequestResetUseCase<U, R, M>
where
    U: UserRepository,
    R: ResetTokenRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, reset_repo: Arc<R>, mailer: Arc<M>) -> Self {
        Self {
            user_repo,
            reset_repo,
            mailer,
        }
    }

    /// Returns `Ok(())` for registered and unregistered addresses alike;
    /// the HTTP response is the same generic message in both cases.
    pub async fn execute(&self, email: String) -> AccountResult<()> {
        let email = Email::new(email)?;

        match self.user_repo.find_by_email(&email).await? {
            Some(user) => {
                let (secret, token) = ResetToken::issue(email);

                // Supersede any previous token for this email.
                // Concurrent requests race here; last writer wins.
                self.reset_repo.upsert(&token).await?;

                // Best-effort: a mail failure must not change the response
                // shape, or it would reveal that the address exists.
                if let Err(e) = self
                    .mailer
                    .send_password_reset(&user.email, &user.name, &secret)
                    .await
                {
                    tracing::warn!(
                        user_id = %user.user_id,
                        error = %e,
                        "Failed to send password reset email"
                    );
                } else {
                    tracing::info!(user_id = %user.user_id, "Password reset email sent");
                }
            }
            None => {
                tracing::debug!("Password reset requested for unknown email");
            }
        }

        Ok(())
    }
}

// ============================================================================
// Complete (reset-password)
// ============================================================================

/// Complete reset use case
pub struct CompleteResetUseCase<U, R>
where
    U: UserRepository,
    R: ResetTokenRepository,
{
    user_repo: Arc<U>,
    reset_repo: Arc<R>,
    config: Arc<AccountConfig>,
}

/// Complete reset input
pub struct CompleteResetInput {
    pub email: String,
    pub token: String,
    pub password: String,
    pub password_confirmation: String,
}

impl<U, R> CompleteResetUseCase<U, R>
where
    U: UserRepository,
    R: ResetTokenRepository,
{
    pub fn new(user_repo: Arc<U>, reset_repo: Arc<R>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            reset_repo,
            config,
        }
    }

    pub async fn execute(&self, input: CompleteResetInput) -> AccountResult<ResetStatus> {
        let email = Email::new(input.email)?;

        if input.token.is_empty() {
            return Err(AccountError::validation(
                "token",
                "The token field is required.",
            ));
        }

        if input.password != input.password_confirmation {
            return Err(AccountError::validation(
                "password",
                "The password confirmation does not match.",
            ));
        }

        let raw_password = RawPassword::new(input.password)?;

        let Some(mut user) = self.user_repo.find_by_email(&email).await? else {
            return Ok(ResetStatus::InvalidUser);
        };

        let Some(record) = self.reset_repo.find_by_email(&email).await? else {
            return Ok(ResetStatus::InvalidToken);
        };

        if !record.matches(&input.token) || record.is_expired(self.config.reset_token_ttl) {
            return Ok(ResetStatus::InvalidToken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        user.set_password(password_hash);
        user.rotate_remember_token();
        self.user_repo.update(&user).await?;

        // Single use: every token for this email is gone after success
        self.reset_repo.delete_for_email(&email).await?;

        tracing::info!(user_id = %user.user_id, "Password reset completed");
        Ok(ResetStatus::Success)
    }
}
