use serde_json::json;
use tracing::info;
use uuid::Uuid;

use summit_client::{Backend, ClientError};
use summit_types::api::NewTestimonial;
use summit_types::models::Testimonial;

/// The `testimonials` collection. Submissions arrive unpublished and only
/// appear on the marketing site once an operator publishes them.
pub struct Testimonials {
    backend: Backend,
}

impl Testimonials {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Public-site form submission; goes out under the anon key.
    pub async fn submit(&self, new: &NewTestimonial) -> Result<Testimonial, ClientError> {
        let row: Testimonial = self.backend.table("testimonials").insert_one(new).await?;
        info!(id = %row.id, "testimonial submitted");
        Ok(row)
    }

    /// Published testimonials for the marketing site, newest first. Public.
    pub async fn list_published(&self) -> Result<Vec<Testimonial>, ClientError> {
        self.backend
            .table("testimonials")
            .select("*")
            .eq("published", true)
            .order_desc("created_at")
            .fetch()
            .await
    }

    /// Everything, including unpublished submissions. Admin only.
    pub async fn list_all(&self, token: &str) -> Result<Vec<Testimonial>, ClientError> {
        self.backend
            .table("testimonials")
            .select("*")
            .order_desc("created_at")
            .bearer(token)
            .fetch()
            .await
    }

    pub async fn set_published(
        &self,
        token: &str,
        id: Uuid,
        published: bool,
    ) -> Result<Testimonial, ClientError> {
        self.backend
            .table("testimonials")
            .eq("id", id)
            .bearer(token)
            .update_one(&json!({ "published": published }))
            .await
    }

    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        self.backend
            .table("testimonials")
            .eq("id", id)
            .bearer(token)
            .delete()
            .await
    }
}
