use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{ChatSender, TicketType};

// -- Token endpoint --

/// Credentials body for the password grant.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Identity record returned by the auth product. The id is an opaque string
/// (the backend happens to use UUIDs, but nothing here depends on that) and
/// `user_metadata` is a free-form map that may carry a `role` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl AuthUser {
    /// The role string from `user_metadata`, if any.
    pub fn role_name(&self) -> Option<&str> {
        self.user_metadata.get("role").and_then(Value::as_str)
    }
}

/// Successful response from `POST /auth/v1/token?grant_type=password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// Error payload from the auth endpoint. Different backend versions use
/// different field names for the human-readable part, so all are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthErrorBody {
    /// First human-readable message present, preferring the most descriptive
    /// field. Callers supply the generic fallback.
    pub fn message(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }
}

// -- Insert / update payloads --

/// Public-site registration form submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewRegistration {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub ticket_type: TicketType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
}

/// Public-site testimonial form submission. Arrives unpublished.
#[derive(Debug, Clone, Serialize)]
pub struct NewTestimonial {
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_title: Option<String>,
    pub quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub conversation_id: Uuid,
    pub sender: ChatSender,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
}

/// Partial update for the settings row. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_open: Option<bool>,
}
