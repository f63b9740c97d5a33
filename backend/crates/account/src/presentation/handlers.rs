//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    AccountConfig, CompleteResetInput, CompleteResetUseCase, LoginInput, LoginUseCase,
    LogoutUseCase, RegisterInput, RegisterUseCase, RequestResetUseCase, ResetStatus,
    SendVerificationUseCase, UploadProfileImageUseCase, VerifyEmailUseCase, VerifyLinkInput,
    VerifyOutcome,
};
use crate::domain::mailer::Mailer;
use crate::domain::object_store::ObjectStore;
use crate::domain::repository::{AccessTokenRepository, ResetTokenRepository, UserRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ProfileImageResponse,
    RegisterRequest, RegisterResponse, ResetPasswordRequest, UserDto, UserResponse,
    VerifyEmailQuery,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for account handlers
pub struct AccountAppState<R, M, S>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub store: Arc<S>,
    pub config: Arc<AccountConfig>,
}

// Manual Clone so M and S do not need to be Clone themselves
impl<R, M, S> Clone for AccountAppState<R, M, S>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        name: req.name,
        email: req.email,
        contact_number: req.contact_number,
        password: req.password,
        password_confirmation: req.password_confirmation,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserDto::from(&output.user),
            access_token: output.access_token,
            token_type: "Bearer",
            message: "Registration successful. Please verify your email address.".to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        user: UserDto::from(&output.user),
        access_token: output.access_token,
        token_type: "Bearer",
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
pub async fn logout<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Extension(current): Extension<CurrentUser>,
) -> AccountResult<Json<MessageResponse>>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(current.token_id).await?;

    Ok(Json(MessageResponse::new("Successfully logged out")))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/user
pub async fn current_user<R, M, S>(
    State(_state): State<AccountAppState<R, M, S>>,
    Extension(current): Extension<CurrentUser>,
) -> AccountResult<Json<UserResponse>>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    Ok(Json(UserResponse {
        user: UserDto::from(&current.user),
    }))
}

// ============================================================================
// Profile Image
// ============================================================================

/// POST /api/upload-profile-image
pub async fn upload_profile_image<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Extension(current): Extension<CurrentUser>,
    multipart: Multipart,
) -> AccountResult<Json<ProfileImageResponse>>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let bytes = read_image_field(multipart).await?;

    let use_case = UploadProfileImageUseCase::new(
        state.repo.clone(),
        state.store.clone(),
        state.config.clone(),
    );

    let user = use_case.execute(current.user, bytes).await?;

    Ok(Json(ProfileImageResponse {
        user: UserDto::from(&user),
        message: "Profile image updated successfully.".to_string(),
    }))
}

/// Pull the `image` part out of the multipart body
async fn read_image_field(mut multipart: Multipart) -> AccountResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AccountError::validation("image", e.to_string()))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AccountError::validation("image", e.to_string()))?;
            return Ok(data.to_vec());
        }
    }

    Err(AccountError::validation(
        "image",
        "The image field is required.",
    ))
}

// ============================================================================
// Email Verification
// ============================================================================

/// GET /api/email/verify/{user_id}/{hash}
pub async fn verify_email<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Path((user_id, hash)): Path<(Uuid, String)>,
    Query(query): Query<VerifyEmailQuery>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.config.clone());

    let outcome = use_case
        .execute(VerifyLinkInput {
            user_id,
            hash,
            expires: query.expires,
            signature: query.signature,
        })
        .await?;

    let (status, message) = match outcome {
        VerifyOutcome::Verified => (StatusCode::OK, "Email verified successfully."),
        VerifyOutcome::AlreadyVerified => (StatusCode::BAD_REQUEST, "Email already verified."),
        VerifyOutcome::Expired => (
            StatusCode::BAD_REQUEST,
            "The verification link has expired.",
        ),
        VerifyOutcome::Mismatch | VerifyOutcome::UserNotFound => {
            (StatusCode::BAD_REQUEST, "Invalid verification link.")
        }
    };

    Ok((status, Json(MessageResponse::new(message))))
}

/// POST /api/email/verification-notification
pub async fn resend_verification<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Extension(current): Extension<CurrentUser>,
) -> AccountResult<Json<MessageResponse>>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = SendVerificationUseCase::new(state.mailer.clone(), state.config.clone());
    use_case.execute(&current.user).await?;

    Ok(Json(MessageResponse::new("Verification email sent.")))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/forgot-password
///
/// The response is identical for registered and unregistered addresses.
pub async fn forgot_password<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AccountResult<Json<MessageResponse>>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = RequestResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
    );

    use_case.execute(req.email).await?;

    Ok(Json(MessageResponse::new(
        "If that email address exists in our system, we have sent a password reset link.",
    )))
}

/// POST /api/reset-password
pub async fn reset_password<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AccountResult<axum::response::Response>
where
    R: UserRepository
        + AccessTokenRepository
        + ResetTokenRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: Mailer + Send + Sync + 'static,
    S: ObjectStore + Send + Sync + 'static,
{
    let use_case = CompleteResetUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let status = use_case
        .execute(CompleteResetInput {
            email: req.email,
            token: req.token,
            password: req.password,
            password_confirmation: req.password_confirmation,
        })
        .await?;

    // Every case is handled here; adding a variant is a compile error
    let response = match status {
        ResetStatus::Success => Json(MessageResponse::new(
            "Password has been reset successfully.",
        ))
        .into_response(),
        ResetStatus::InvalidToken => AppError::bad_request("Invalid or expired reset token.")
            .with_field_error(
                "token",
                "The password reset token is invalid or has expired.",
            )
            .into_response(),
        ResetStatus::InvalidUser => AppError::bad_request("Invalid user.")
            .with_field_error("email", "We cannot find a user with that email address.")
            .into_response(),
    };

    Ok(response)
}
