/// Typed access to the remote collections, one thin repository per
/// collection. No business logic lives here: each method is one request
/// against the hosted backend, shaped the way the corresponding page issues
/// it. Admin operations take the session's bearer token explicitly; public
/// site operations go out under the anon key.
///
/// Permission gating stays in the consuming UI layer (via the session
/// manager's capability checks), not in these repositories.

pub mod chat;
pub mod registrations;
pub mod settings;
pub mod tasks;
pub mod testimonials;
pub mod tickets;

pub use chat::Chat;
pub use registrations::{RegistrationFilter, Registrations};
pub use settings::Settings;
pub use tasks::Tasks;
pub use testimonials::Testimonials;
pub use tickets::Tickets;
