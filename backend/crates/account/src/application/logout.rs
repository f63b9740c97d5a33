//! Logout Use Case
//!
//! Revokes exactly the token that authenticated the current request.
//! Other sessions of the same user stay live.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repository::AccessTokenRepository;
use crate::error::AccountResult;

/// Logout use case
pub struct LogoutUseCase<T>
where
    T: AccessTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> LogoutUseCase<T>
where
    T: AccessTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Delete the token record. Deleting an already-gone record is not an
    /// error; revocation is idempotent.
    pub async fn execute(&self, token_id: Uuid) -> AccountResult<()> {
        self.token_repo.delete(token_id).await?;

        tracing::info!(token_id = %token_id, "Access token revoked");
        Ok(())
    }
}
