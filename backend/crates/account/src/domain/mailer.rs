//! Mail Transport Trait
//!
//! Narrow contract for delivering templated account mail. The SMTP
//! implementation lives in the infrastructure layer.

use crate::domain::value_object::email::Email;
use crate::error::AccountResult;

/// Outbound mail port
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Send the email-ownership verification message with its signed link
    async fn send_verification(
        &self,
        to: &Email,
        name: &str,
        verify_url: &str,
    ) -> AccountResult<()>;

    /// Send the password-reset message with the cleartext token
    async fn send_password_reset(&self, to: &Email, name: &str, token: &str) -> AccountResult<()>;
}
