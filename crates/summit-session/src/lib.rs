/// Session and authorization for the admin back-office.
///
/// One `SessionManager` instance owns the logged-in identity: it restores a
/// persisted session at startup, performs password logins against the hosted
/// auth endpoint, tears the session down on logout, and answers
/// role/capability questions for the rest of the application. Nothing else
/// mutates session state; consumers only read through the accessors.

pub mod error;
pub mod manager;
pub mod permissions;
pub mod store;

pub use error::AuthError;
pub use manager::{Session, SessionManager};
pub use permissions::{Capability, Role, role_has_capability};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoredSession};
