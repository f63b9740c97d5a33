//! Account Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::mailer::Mailer;
use crate::domain::object_store::ObjectStore;
use crate::domain::repository::{AccessTokenRepository, ResetTokenRepository, UserRepository};
use crate::infra::{LocalDiskStore, PgAccountRepository, SmtpMailer};
use crate::presentation::handlers::{self, AccountAppState};
use crate::presentation::middleware::require_auth;

/// Multipart bodies may exceed the image cap by boundary overhead
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Create the Account router with the production infrastructure
pub fn account_router(
    repo: PgAccountRepository,
    mailer: SmtpMailer,
    store: LocalDiskStore,
    config: AccountConfig,
) -> Router {
    account_router_generic(repo, mailer, store, config)
}

/// Create a generic Account router for any implementations of the ports
pub fn account_router_generic<R, M, S>(
    repo: R,
    mailer: M,
    store: S,
    config: AccountConfig,
) -> Router
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
    let state = AccountAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        store: Arc::new(store),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R, M, S>))
        .route("/user", get(handlers::current_user::<R, M, S>))
        .route(
            "/upload-profile-image",
            post(handlers::upload_profile_image::<R, M, S>)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/email/verification-notification",
            post(handlers::resend_verification::<R, M, S>),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth::<R, M, S>));

    Router::new()
        .route("/register", post(handlers::register::<R, M, S>))
        .route("/login", post(handlers::login::<R, M, S>))
        .route("/forgot-password", post(handlers::forgot_password::<R, M, S>))
        .route("/reset-password", post(handlers::reset_password::<R, M, S>))
        .route(
            "/email/verify/{user_id}/{hash}",
            get(handlers::verify_email::<R, M, S>),
        )
        .merge(protected)
        .with_state(state)
}
