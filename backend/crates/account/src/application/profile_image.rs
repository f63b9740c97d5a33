//! Upload Profile Image Use Case
//!
//! Validates, normalizes, and stores a profile image. Every upload is
//! cover-cropped to a fixed square and re-encoded as JPEG before storage,
//! so the store only ever holds one format at one size. The previous
//! image is deleted after the replacement is in place.

use std::sync::Arc;

use chrono::Utc;
use image::{ImageFormat, codecs::jpeg::JpegEncoder, imageops::FilterType};

use crate::application::config::AccountConfig;
use crate::domain::entity::user::User;
use crate::domain::object_store::ObjectStore;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// JPEG quality of the normalized output
const JPEG_QUALITY: u8 = 85;

/// Upload profile image use case
pub struct UploadProfileImageUseCase<U, S>
where
    U: UserRepository,
    S: ObjectStore,
{
    user_repo: Arc<U>,
    store: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<U, S> UploadProfileImageUseCase<U, S>
where
    U: UserRepository,
    S: ObjectStore,
{
    pub fn new(user_repo: Arc<U>, store: Arc<S>, config: Arc<AccountConfig>) -> Self {
        Self {
            user_repo,
            store,
            config,
        }
    }

    /// Process and store the upload, returning the updated user.
    pub async fn execute(&self, mut user: User, bytes: Vec<u8>) -> AccountResult<User> {
        if bytes.is_empty() {
            return Err(AccountError::validation(
                "image",
                "The image field is required.",
            ));
        }

        if bytes.len() > self.config.profile_image_max_bytes {
            return Err(AccountError::validation(
                "image",
                format!(
                    "The image must not be greater than {} kilobytes.",
                    self.config.profile_image_max_bytes / 1024
                ),
            ));
        }

        let format = image::guess_format(&bytes)
            .map_err(|e| AccountError::ImageProcessing(e.to_string()))?;

        if !matches!(
            format,
            ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP
        ) {
            return Err(AccountError::validation(
                "image",
                "The image must be a file of type: jpeg, png, gif, webp.",
            ));
        }

        let normalized = self.normalize(&bytes, format)?;

        let path = format!(
            "profile-images/{}_{}.jpg",
            user.user_id,
            Utc::now().timestamp()
        );
        self.store.put(&path, normalized).await?;

        let previous = user.set_profile_image(Some(path));
        self.user_repo.update(&user).await?;

        // The replacement is durable; losing the old object is harmless
        if let Some(previous) = previous {
            if let Err(e) = self.store.delete(&previous).await {
                tracing::warn!(path = %previous, error = %e, "Failed to delete previous profile image");
            }
        }

        tracing::info!(user_id = %user.user_id, "Profile image updated");
        Ok(user)
    }

    /// Decode, cover-crop to a centred square, re-encode as JPEG
    fn normalize(&self, bytes: &[u8], format: ImageFormat) -> AccountResult<Vec<u8>> {
        let dim = self.config.profile_image_size;

        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| AccountError::ImageProcessing(e.to_string()))?;

        let resized = decoded.resize_to_fill(dim, dim, FilterType::Lanczos3);
        let rgb = resized.to_rgb8();

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
            .encode_image(&rgb)
            .map_err(|e| AccountError::ImageProcessing(e.to_string()))?;

        Ok(out)
    }
}
