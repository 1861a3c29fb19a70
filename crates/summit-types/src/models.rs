use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Registrations --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    Standard,
    Student,
    Vip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// One attendee registration as stored in the `registrations` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub company: Option<String>,
    pub ticket_type: TicketType,
    pub status: RegistrationStatus,
    pub dietary_notes: Option<String>,
    /// Set by an operator once the registration has been looked at.
    /// The notification feed treats un-reviewed rows as unread.
    pub reviewed: bool,
    pub created_at: DateTime<Utc>,
}

// -- Testimonials --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub author_title: Option<String>,
    pub quote: String,
    pub avatar_url: Option<String>,
    /// Only published testimonials appear on the marketing site.
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

// -- Support tickets --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    Pending,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: Uuid,
    pub subject: String,
    pub sender_name: String,
    pub sender_email: String,
    pub body: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub created_at: DateTime<Utc>,
}

// -- Live chat --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConversation {
    pub id: Uuid,
    pub visitor_name: String,
    pub visitor_email: Option<String>,
    pub status: ConversationStatus,
    pub last_message_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    Visitor,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender: ChatSender,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

// -- Admin tasks --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminTask {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

// -- Site settings --

/// Cosmetic settings for the marketing site. Stored as a single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub id: Uuid,
    pub site_title: String,
    pub tagline: String,
    pub primary_color: String,
    pub hero_image_url: Option<String>,
    pub registration_open: bool,
    pub updated_at: DateTime<Utc>,
}
