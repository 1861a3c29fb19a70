use reqwest::header;
use tracing::info;

use crate::backend::{Backend, api_error};
use crate::error::ClientError;

impl Backend {
    /// Upload an object to a storage bucket (testimonial avatars, the hero
    /// image). The body goes up in one piece — uploads here are small images,
    /// not file transfers.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        bearer: Option<&str>,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/storage/v1/object/{bucket}/{path}"));
        let token = bearer.unwrap_or(self.anon_key());
        let size = bytes.len();

        let resp = self
            .http()
            .post(&url)
            .header("apikey", self.anon_key())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        info!(bucket, path, size, "uploaded object");
        Ok(())
    }

    /// Public URL for an object in a public bucket. No request is made; the
    /// URL shape is part of the storage product's contract.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }
}
