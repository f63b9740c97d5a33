//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{access_token::AccessToken, reset_token::ResetToken, user::User};
use crate::domain::repository::{AccessTokenRepository, ResetTokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, phone_number::PhoneNumber, user_id::UserId, user_password::UserPassword,
};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                email_verified_at,
                contact_number,
                profile_image,
                remember_token,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.email_verified_at)
        .bind(user.contact_number.as_ref().map(|c| c.as_str()))
        .bind(&user.profile_image)
        .bind(&user.remember_token)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Unique index on email is the authoritative duplicate check;
            // a race past exists_by_email lands here.
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some("23505") => {
                Err(AccountError::validation(
                    "email",
                    "The email has already been taken.",
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                name,
                email,
                password_hash,
                email_verified_at,
                contact_number,
                profile_image,
                remember_token,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                name,
                email,
                password_hash,
                email_verified_at,
                contact_number,
                profile_image,
                remember_token,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                email_verified_at = $5,
                contact_number = $6,
                profile_image = $7,
                remember_token = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.email_verified_at)
        .bind(user.contact_number.as_ref().map(|c| c.as_str()))
        .bind(&user.profile_image)
        .bind(&user.remember_token)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Access Token Repository Implementation
// ============================================================================

impl AccessTokenRepository for PgAccountRepository {
    async fn create(&self, token: &AccessToken) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens (
                token_id,
                user_id,
                name,
                token_hash,
                created_at,
                last_used_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.token_id)
        .bind(token.user_id.as_uuid())
        .bind(&token.name)
        .bind(&token.token_hash)
        .bind(token.created_at)
        .bind(token.last_used_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, token_id: Uuid) -> AccountResult<Option<AccessToken>> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT
                token_id,
                user_id,
                name,
                token_hash,
                created_at,
                last_used_at
            FROM access_tokens
            WHERE token_id = $1
            "#,
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_token()))
    }

    async fn update(&self, token: &AccessToken) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE access_tokens SET
                last_used_at = $2
            WHERE token_id = $1
            "#,
        )
        .bind(token.token_id)
        .bind(token.last_used_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, token_id: Uuid) -> AccountResult<()> {
        sqlx::query("DELETE FROM access_tokens WHERE token_id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Reset Token Repository Implementation
// ============================================================================

impl ResetTokenRepository for PgAccountRepository {
    async fn upsert(&self, token: &ResetToken) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (email, token_hash, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE SET
                token_hash = EXCLUDED.token_hash,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(token.email.as_str())
        .bind(&token.token_hash)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<ResetToken>> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"
            SELECT email, token_hash, created_at
            FROM password_reset_tokens
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_token()))
    }

    async fn delete_for_email(&self, email: &Email) -> AccountResult<()> {
        sqlx::query("DELETE FROM password_reset_tokens WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    email_verified_at: Option<DateTime<Utc>>,
    contact_number: Option<String>,
    profile_image: Option<String>,
    remember_token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|_| AccountError::Internal("Invalid password hash in database".to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            password_hash,
            email_verified_at: self.email_verified_at,
            contact_number: self.contact_number.map(PhoneNumber::from_db),
            profile_image: self.profile_image,
            remember_token: self.remember_token,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccessTokenRow {
    token_id: Uuid,
    user_id: Uuid,
    name: String,
    token_hash: Vec<u8>,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
}

impl AccessTokenRow {
    fn into_token(self) -> AccessToken {
        AccessToken {
            token_id: self.token_id,
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            token_hash: self.token_hash,
            created_at: self.created_at,
            last_used_at: self.last_used_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResetTokenRow {
    email: String,
    token_hash: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl ResetTokenRow {
    fn into_token(self) -> ResetToken {
        ResetToken {
            email: Email::from_db(self.email),
            token_hash: self.token_hash,
            created_at: self.created_at,
        }
    }
}
