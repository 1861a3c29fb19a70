use serde_json::json;
use tracing::info;
use uuid::Uuid;

use summit_client::{Backend, ClientError};
use summit_types::api::NewRegistration;
use summit_types::models::{Registration, RegistrationStatus};

/// Optional narrowing for the admin list view. The default is "everything,
/// newest first".
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    pub status: Option<RegistrationStatus>,
    /// Case-insensitive substring match on the attendee name.
    pub search: Option<String>,
    pub limit: Option<usize>,
}

/// The `registrations` collection.
pub struct Registrations {
    backend: Backend,
}

impl Registrations {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Public-site form submission; goes out under the anon key.
    pub async fn submit(&self, new: &NewRegistration) -> Result<Registration, ClientError> {
        let row: Registration = self
            .backend
            .table("registrations")
            .insert_one(new)
            .await?;
        info!(id = %row.id, "registration submitted");
        Ok(row)
    }

    /// Admin list, newest first, optionally narrowed.
    pub async fn list(
        &self,
        token: &str,
        filter: &RegistrationFilter,
    ) -> Result<Vec<Registration>, ClientError> {
        let mut query = self
            .backend
            .table("registrations")
            .select("*")
            .order_desc("created_at")
            .bearer(token);

        if let Some(status) = filter.status {
            query = query.eq("status", status.as_str());
        }
        if let Some(search) = &filter.search {
            query = query.contains("full_name", search);
        }
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        query.fetch().await
    }

    pub async fn set_status(
        &self,
        token: &str,
        id: Uuid,
        status: RegistrationStatus,
    ) -> Result<Registration, ClientError> {
        self.backend
            .table("registrations")
            .eq("id", id)
            .bearer(token)
            .update_one(&json!({ "status": status }))
            .await
    }

    /// Flag a registration as looked-at; clears its notification unread-ness
    /// on the next poll.
    pub async fn mark_reviewed(&self, token: &str, id: Uuid) -> Result<Registration, ClientError> {
        self.backend
            .table("registrations")
            .eq("id", id)
            .bearer(token)
            .update_one(&json!({ "reviewed": true }))
            .await
    }

    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        self.backend
            .table("registrations")
            .eq("id", id)
            .bearer(token)
            .delete()
            .await
    }
}
