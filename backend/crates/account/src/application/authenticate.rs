//! Authenticate Use Case
//!
//! Resolves a presented bearer token to its owning user. "Malformed",
//! "unknown", and "wrong secret" are indistinguishable from the outside:
//! all return `Unauthenticated` with no further detail, so responses
//! cannot be used as a token-existence oracle.

use std::sync::Arc;

use crate::domain::entity::access_token::{AccessToken, split_cleartext};
use crate::domain::entity::user::User;
use crate::domain::repository::{AccessTokenRepository, UserRepository};
use crate::error::{AccountError, AccountResult};

/// A successfully authenticated request context
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: User,
    pub token: AccessToken,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
}

impl<U, T> AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: AccessTokenRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    pub async fn execute(&self, presented: &str) -> AccountResult<Authenticated> {
        let (token_id, secret) =
            split_cleartext(presented).ok_or(AccountError::Unauthenticated)?;

        let token = self
            .token_repo
            .find_by_id(token_id)
            .await?
            .ok_or(AccountError::Unauthenticated)?;

        if !token.matches(secret) {
            return Err(AccountError::Unauthenticated);
        }

        let user = self
            .user_repo
            .find_by_id(&token.user_id)
            .await?
            .ok_or(AccountError::Unauthenticated)?;

        // Record usage in the background; authentication does not wait on it
        let mut touched = token.clone();
        touched.touch();
        let repo = self.token_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&touched).await {
                tracing::warn!(error = %e, "Failed to update token last_used_at");
            }
        });

        Ok(Authenticated { user, token })
    }
}
