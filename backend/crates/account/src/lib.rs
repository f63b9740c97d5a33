//! Account (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits, signed-link codec
//! - `application/` - Use cases and application services
//! - `infra/` - Database, mail, and object storage implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration and login with email + password
//! - Bearer-token sessions (multiple concurrent tokens per user)
//! - Email ownership verification via signed, expiring links
//! - Single-use password reset tokens
//! - Profile image upload with server-side normalization
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Token secrets stored as SHA-256 hashes, compared in constant time
//! - Verification links are HMAC-signed over the user's current email
//! - Credential and token failures return uniform responses

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::mail::{SmtpConfig, SmtpMailer};
pub use infra::postgres::PgAccountRepository;
pub use infra::storage::LocalDiskStore;
pub use presentation::router::account_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
