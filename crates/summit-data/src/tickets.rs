use serde_json::json;
use uuid::Uuid;

use summit_client::{Backend, ClientError};
use summit_types::models::{SupportTicket, TicketPriority, TicketStatus};

/// The `support_tickets` collection, the admin inbox. All operations are
/// admin-side; tickets are created by a contact form outside this scope.
pub struct Tickets {
    backend: Backend,
}

impl Tickets {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Newest first, optionally narrowed to one status.
    pub async fn list(
        &self,
        token: &str,
        status: Option<TicketStatus>,
    ) -> Result<Vec<SupportTicket>, ClientError> {
        let mut query = self
            .backend
            .table("support_tickets")
            .select("*")
            .order_desc("created_at")
            .bearer(token);

        if let Some(status) = status {
            query = query.eq("status", status.as_str());
        }

        query.fetch().await
    }

    pub async fn set_status(
        &self,
        token: &str,
        id: Uuid,
        status: TicketStatus,
    ) -> Result<SupportTicket, ClientError> {
        self.backend
            .table("support_tickets")
            .eq("id", id)
            .bearer(token)
            .update_one(&json!({ "status": status }))
            .await
    }

    pub async fn set_priority(
        &self,
        token: &str,
        id: Uuid,
        priority: TicketPriority,
    ) -> Result<SupportTicket, ClientError> {
        self.backend
            .table("support_tickets")
            .eq("id", id)
            .bearer(token)
            .update_one(&json!({ "priority": priority }))
            .await
    }
}
