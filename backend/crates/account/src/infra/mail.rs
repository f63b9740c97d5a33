//! SMTP Mailer Implementation
//!
//! lettre-backed implementation of the `Mailer` port. Message bodies are
//! plain text; the front-end owns all presentation.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use crate::domain::mailer::Mailer;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

/// SMTP connection settings
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub use_tls: bool,
    /// From header, e.g. `Example <no-reply@example.com>`
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            use_tls: false,
            from: "Example App <no-reply@example.test>".to_string(),
        }
    }
}

/// SMTP mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build a mailer from connection settings.
    ///
    /// Port 465 uses implicit TLS (SMTPS); other TLS ports use STARTTLS.
    pub fn new(config: SmtpConfig) -> AccountResult<Self> {
        let mut builder = if config.use_tls {
            let tls_params = TlsParameters::new(config.host.clone())
                .map_err(|e| AccountError::Mail(format!("TLS configuration error: {}", e)))?;

            if config.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                    .map_err(|e| AccountError::Mail(format!("SMTP relay error: {}", e)))?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .map_err(|e| AccountError::Mail(format!("SMTP relay error: {}", e)))?
                    .port(config.port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host).port(config.port)
        };

        if let (Some(user), Some(pass)) = (config.username, config.password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from,
        })
    }

    async fn send_plain(&self, to: &Email, subject: &str, body: String) -> AccountResult<()> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AccountError::Mail(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .as_str()
                .parse()
                .map_err(|e| AccountError::Mail(format!("Invalid to address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AccountError::Mail(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AccountError::Mail(e.to_string()))?;

        Ok(())
    }
}

impl Mailer for SmtpMailer {
    async fn send_verification(
        &self,
        to: &Email,
        name: &str,
        verify_url: &str,
    ) -> AccountResult<()> {
        let body = format!(
            "Hello {name},\n\n\
             Please click the link below to verify your email address.\n\n\
             {verify_url}\n\n\
             If you did not create an account, no further action is required.\n"
        );

        self.send_plain(to, "Verify Email Address", body).await
    }

    async fn send_password_reset(&self, to: &Email, name: &str, token: &str) -> AccountResult<()> {
        let body = format!(
            "Hello {name},\n\n\
             You are receiving this email because we received a password reset \
             request for your account.\n\n\
             Reset token: {token}\n\n\
             This password reset token will expire in 60 minutes.\n\n\
             If you did not request a password reset, no further action is required.\n"
        );

        self.send_plain(to, "Reset Password Notification", body).await
    }
}
