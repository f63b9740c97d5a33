//! Register Use Case
//!
//! Creates a new account, issues the first bearer token, and dispatches
//! the verification mail.

use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::application::verify_email::SendVerificationUseCase;
use crate::domain::entity::{access_token::AccessToken, user::User};
use crate::domain::mailer::Mailer;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    phone_number::PhoneNumber,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AccountError, AccountResult};

/// Maximum length of the name field
const NAME_MAX_LENGTH: usize = 255;

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub contact_number: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

/// Register output
pub struct RegisterOutput {
    /// The created user
    pub user: User,
    /// Cleartext bearer token; this is the only place it ever exists
    pub access_token: String,
}

/// Register use case
pub struct RegisterUseCase<U, T, M>
where
    U: UserRepository,
    T: AccessTokenRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    mailer: Arc<M>,
    config: Arc<AccountConfig>,
}

impl<U, T, M> RegisterUseCase<U, T, M>
where
    U: UserRepository,
    T: AccessTokenRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<T>,
        mailer: Arc<M>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountResult<RegisterOutput> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AccountError::validation(
                "name",
                "The name field is required.",
            ));
        }
        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(AccountError::validation(
                "name",
                format!(
                    "The name must not be greater than {} characters.",
                    NAME_MAX_LENGTH
                ),
            ));
        }

        let email = Email::new(input.email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AccountError::validation(
                "email",
                "The email has already been taken.",
            ));
        }

        let contact_number = match input.contact_number {
            Some(raw) => Some(PhoneNumber::new(raw)?),
            None => {
                return Err(AccountError::validation(
                    "contact_number",
                    "The contact number field is required.",
                ));
            }
        };

        if input.password != input.password_confirmation {
            return Err(AccountError::validation(
                "password",
                "The password confirmation does not match.",
            ));
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(name, email, password_hash, contact_number);
        self.user_repo.create(&user).await?;

        let (access_token, token_record) =
            AccessToken::issue(user.user_id, self.config.token_name.clone());
        self.token_repo.create(&token_record).await?;

        // Verification mail is best-effort: the account exists either way
        // and the notification can be resent.
        let send = SendVerificationUseCase::new(self.mailer.clone(), self.config.clone());
        if let Err(e) = send.execute(&user).await {
            tracing::warn!(
                user_id = %user.user_id,
                error = %e,
                "Failed to send verification email at registration"
            );
        }

        tracing::info!(
            user_id = %user.user_id,
            token_id = %token_record.token_id,
            "User registered"
        );

        Ok(RegisterOutput { user, access_token })
    }
}
