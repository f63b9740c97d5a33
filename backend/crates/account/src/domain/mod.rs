//! Domain Layer
//!
//! Contains entities, value objects, repository traits, outbound ports,
//! and the signed-link codec.

pub mod entity;
pub mod mailer;
pub mod object_store;
pub mod repository;
pub mod signed_link;
pub mod value_object;

// Re-exports
pub use entity::{access_token::AccessToken, reset_token::ResetToken, user::User};
pub use mailer::Mailer;
pub use object_store::ObjectStore;
pub use repository::{AccessTokenRepository, ResetTokenRepository, UserRepository};
