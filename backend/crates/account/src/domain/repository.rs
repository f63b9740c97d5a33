//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{access_token::AccessToken, reset_token::ResetToken, user::User};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AccountResult;
use uuid::Uuid;

/// User directory trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user (fails on duplicate email)
    async fn create(&self, user: &User) -> AccountResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AccountResult<()>;
}

/// Access token registry trait
#[trait_variant::make(AccessTokenRepository: Send)]
pub trait LocalAccessTokenRepository {
    /// Store a freshly issued token record
    async fn create(&self, token: &AccessToken) -> AccountResult<()>;

    /// Find token record by ID
    async fn find_by_id(&self, token_id: Uuid) -> AccountResult<Option<AccessToken>>;

    /// Update token record (e.g. last_used_at)
    async fn update(&self, token: &AccessToken) -> AccountResult<()>;

    /// Delete exactly one token record; deleting an absent record is a no-op
    async fn delete(&self, token_id: Uuid) -> AccountResult<()>;
}

/// Password reset token store trait
#[trait_variant::make(ResetTokenRepository: Send)]
pub trait LocalResetTokenRepository {
    /// Store a reset token, superseding any previous token for the email
    async fn upsert(&self, token: &ResetToken) -> AccountResult<()>;

    /// Find the current token for an email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<ResetToken>>;

    /// Delete all reset tokens for an email
    async fn delete_for_email(&self, email: &Email) -> AccountResult<()>;
}
