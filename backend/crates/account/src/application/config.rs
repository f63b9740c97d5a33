//! Application Configuration
//!
//! Configuration for the Account application layer.

use std::time::Duration;

/// Account application configuration
#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Server key for HMAC signing of verification links (32 bytes)
    pub app_key: [u8; 32],
    /// Base URL used when rendering links into mail (no trailing slash)
    pub app_url: String,
    /// Validity window of email verification links (60 minutes)
    pub verification_link_ttl: Duration,
    /// Validity window of password reset tokens (60 minutes)
    pub reset_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Label given to tokens issued by login/register
    pub token_name: String,
    /// Square dimension profile images are normalized to
    pub profile_image_size: u32,
    /// Maximum accepted upload size in bytes
    pub profile_image_max_bytes: usize,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            app_key: [0u8; 32],
            app_url: "http://localhost:8000".to_string(),
            verification_link_ttl: Duration::from_secs(60 * 60),
            reset_token_ttl: Duration::from_secs(60 * 60),
            password_pepper: None,
            token_name: "auth_token".to_string(),
            profile_image_size: 250,
            profile_image_max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AccountConfig {
    /// Create config with a random app key (for development)
    pub fn with_random_key() -> Self {
        let mut app_key = [0u8; 32];
        app_key.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            app_key,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_key()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
