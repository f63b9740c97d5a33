//! API DTOs (Data Transfer Objects)
//!
//! Field names follow the wire format the front-end client already uses
//! (snake_case, `access_token`/`token_type` pairs).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Requests
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Older clients send `contact` instead of `contact_number`
    #[serde(default, alias = "contact")]
    pub contact_number: Option<String>,
    pub password: String,
    pub password_confirmation: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Forgot password request
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset password request
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Query half of a verification link (`expires` + its signature)
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailQuery {
    pub expires: i64,
    pub signature: String,
}

// ============================================================================
// Responses
// ============================================================================

/// User as exposed over the API. Password hash and remember token never
/// leave the domain layer.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub contact_number: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            email_verified_at: user.email_verified_at,
            contact_number: user.contact_number.as_ref().map(|c| c.as_str().to_string()),
            profile_image: user.profile_image.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserDto,
    pub access_token: String,
    pub token_type: &'static str,
    pub message: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserDto,
    pub access_token: String,
    pub token_type: &'static str,
}

/// Bare message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Authenticated user response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserDto,
}

/// Profile image upload response
#[derive(Debug, Serialize)]
pub struct ProfileImageResponse {
    pub user: UserDto,
    pub message: String,
}
