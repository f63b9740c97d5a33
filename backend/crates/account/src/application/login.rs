//! Login Use Case
//!
//! Verifies credentials and issues a fresh, independent bearer token.
//! Every failure surfaces the same field-scoped message so responses do
//! not reveal whether the email is registered.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::entity::{access_token::AccessToken, user::User};
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    /// Cleartext bearer token, shown once
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AccountConfig>,
}

impl<U, T> LoginUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let email = Email::new(input.email).map_err(|_| invalid_credentials())?;

        let user = self.user_repo.find_by_email(&email).await?;

        let raw_password = RawPassword::new(input.password).map_err(|_| invalid_credentials())?;

        let user = user.ok_or_else(invalid_credentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.user_id, "Failed login attempt");
            return Err(invalid_credentials());
        }

        let (access_token, token_record) =
            AccessToken::issue(user.user_id, self.config.token_name.clone());
        self.token_repo.create(&token_record).await?;

        tracing::info!(
            user_id = %user.user_id,
            token_id = %token_record.token_id,
            "User logged in"
        );

        Ok(LoginOutput { user, access_token })
    }
}

/// Uniform credential failure, field-scoped the way the client expects
fn invalid_credentials() -> AccountError {
    AccountError::validation("email", "The provided credentials are incorrect.")
}
