//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login;
pub mod logout;
pub mod password_reset;
pub mod profile_image;
pub mod register;
pub mod verify_email;

// Re-exports
pub use authenticate::{Authenticated, AuthenticateUseCase};
pub use config::AccountConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use password_reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetUseCase, ResetStatus,
};
pub use profile_image::UploadProfileImageUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use verify_email::{
    SendVerificationUseCase, VerifyEmailUseCase, VerifyLinkInput, VerifyOutcome,
};
