use serde_json::json;
use uuid::Uuid;

use summit_client::{Backend, ClientError};
use summit_types::api::NewChatMessage;
use summit_types::models::{ChatConversation, ChatMessage, ChatSender, ConversationStatus};

/// The live-chat collections: `chat_conversations` and `chat_messages`.
/// The visitor side of a conversation is written by the public site outside
/// this scope; the agent side goes through here.
pub struct Chat {
    backend: Backend,
}

impl Chat {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Conversations by most recent activity.
    pub async fn conversations(&self, token: &str) -> Result<Vec<ChatConversation>, ClientError> {
        self.backend
            .table("chat_conversations")
            .select("*")
            .order_desc("last_message_at")
            .bearer(token)
            .fetch()
            .await
    }

    /// Messages of one conversation, oldest first (transcript order).
    pub async fn messages(
        &self,
        token: &str,
        conversation_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.backend
            .table("chat_messages")
            .select("*")
            .eq("conversation_id", conversation_id)
            .order_asc("sent_at")
            .bearer(token)
            .fetch()
            .await
    }

    /// Agent reply into a conversation.
    pub async fn send_reply(
        &self,
        token: &str,
        conversation_id: Uuid,
        body: &str,
    ) -> Result<ChatMessage, ClientError> {
        self.backend
            .table("chat_messages")
            .bearer(token)
            .insert_one(&NewChatMessage {
                conversation_id,
                sender: ChatSender::Agent,
                body: body.to_owned(),
            })
            .await
    }

    pub async fn close(
        &self,
        token: &str,
        conversation_id: Uuid,
    ) -> Result<ChatConversation, ClientError> {
        self.backend
            .table("chat_conversations")
            .eq("id", conversation_id)
            .bearer(token)
            .update_one(&json!({ "status": ConversationStatus::Closed }))
            .await
    }
}
