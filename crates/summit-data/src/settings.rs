use uuid::Uuid;

use summit_client::{Backend, ClientError};
use summit_types::api::SettingsPatch;
use summit_types::models::SiteSettings;

/// Public storage bucket for uploaded site imagery.
const MEDIA_BUCKET: &str = "media";

/// The `site_settings` collection — a single row of cosmetic settings for
/// the marketing site — plus the hero image upload that feeds it.
pub struct Settings {
    backend: Backend,
}

impl Settings {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// The settings row. Public: the marketing site reads it to render.
    pub async fn get(&self) -> Result<SiteSettings, ClientError> {
        self.backend
            .table("site_settings")
            .select("*")
            .fetch_one()
            .await
    }

    /// Patch the settings row; absent fields are untouched.
    pub async fn update(
        &self,
        token: &str,
        patch: &SettingsPatch,
    ) -> Result<SiteSettings, ClientError> {
        let current = self.get().await?;
        self.backend
            .table("site_settings")
            .eq("id", current.id)
            .bearer(token)
            .update_one(patch)
            .await
    }

    /// Upload a hero image to the public bucket and return its public URL.
    /// The caller patches the URL into the settings row.
    pub async fn upload_hero_image(
        &self,
        token: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ClientError> {
        let ext = match content_type {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        };
        let path = format!("hero/{}.{ext}", Uuid::new_v4());

        self.backend
            .upload_object(MEDIA_BUCKET, &path, bytes, content_type, Some(token))
            .await?;

        Ok(self.backend.public_object_url(MEDIA_BUCKET, &path))
    }
}
