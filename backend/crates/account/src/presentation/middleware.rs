//! Bearer Token Middleware
//!
//! Resolves the `Authorization: Bearer` header to a `CurrentUser`
//! extension for protected routes. Responses never distinguish why a
//! token was rejected.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::AuthenticateUseCase;
use crate::domain::entity::user::User;
use crate::error::AccountError;
use crate::presentation::handlers::AccountAppState;
use crate::domain::mailer::Mailer;
use crate::domain::object_store::ObjectStore;
use crate::domain::repository::{
    AccessTokenRepository, ResetTokenRepository, UserRepository,
};

/// Authenticated request context, inserted into request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    /// The token that authenticated this request; logout revokes exactly this
    pub token_id: Uuid,
}

/// Middleware that requires a valid bearer token
pub async fn require_auth<R, M, S>(
    State(state): State<AccountAppState<R, M, S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
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
    let Some(token) = extract_bearer_token(req.headers()) else {
        return Err(AccountError::Unauthenticated.into_response());
    };

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.repo.clone());

    match use_case.execute(&token).await {
        Ok(auth) => {
            req.extensions_mut().insert(CurrentUser {
                user: auth.user,
                token_id: auth.token.token_id,
            });
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_bearer_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc123"));
        assert_eq!(extract_bearer_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
