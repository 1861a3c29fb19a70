use serde_json::json;
use uuid::Uuid;

use summit_client::{Backend, ClientError};
use summit_types::api::NewTask;
use summit_types::models::AdminTask;

/// The `admin_tasks` collection, a shared to-do list for the back-office.
pub struct Tasks {
    backend: Backend,
}

impl Tasks {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Newest first.
    pub async fn list(&self, token: &str) -> Result<Vec<AdminTask>, ClientError> {
        self.backend
            .table("admin_tasks")
            .select("*")
            .order_desc("created_at")
            .bearer(token)
            .fetch()
            .await
    }

    pub async fn create(&self, token: &str, title: &str) -> Result<AdminTask, ClientError> {
        self.backend
            .table("admin_tasks")
            .bearer(token)
            .insert_one(&NewTask {
                title: title.to_owned(),
            })
            .await
    }

    pub async fn set_completed(
        &self,
        token: &str,
        id: Uuid,
        completed: bool,
    ) -> Result<AdminTask, ClientError> {
        self.backend
            .table("admin_tasks")
            .eq("id", id)
            .bearer(token)
            .update_one(&json!({ "completed": completed }))
            .await
    }

    pub async fn delete(&self, token: &str, id: Uuid) -> Result<(), ClientError> {
        self.backend
            .table("admin_tasks")
            .eq("id", id)
            .bearer(token)
            .delete()
            .await
    }
}
