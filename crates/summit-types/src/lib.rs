/// Shared types for the Summit workspace.
///
/// `models` holds the rows of the remote collections as the hosted backend
/// returns them; `api` holds the wire payloads exchanged with its auth and
/// REST endpoints. Nothing in here talks to the network.

pub mod api;
pub mod models;

pub use api::{AuthErrorBody, AuthUser, TokenRequest, TokenResponse};
pub use models::{
    AdminTask, ChatConversation, ChatMessage, ChatSender, ConversationStatus, Registration,
    RegistrationStatus, SiteSettings, SupportTicket, Testimonial, TicketPriority, TicketStatus,
    TicketType,
};
