use thiserror::Error;

use summit_client::ClientError;

/// Login and session failures. Notification polling never produces these —
/// transient fetch errors are swallowed at that module's boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the login. The message is the server's
    /// own (`error_description` et al.) and is shown verbatim to the user.
    #[error("{0}")]
    Credentials(String),

    /// The request never completed — DNS, refused connection, torn body.
    #[error("login request failed: {0}")]
    Network(#[source] ClientError),

    /// A logout happened while this login was in flight; its result was
    /// discarded rather than resurrecting a session the operator ended.
    #[error("login superseded by logout")]
    Superseded,

    /// The session could not be persisted. Nothing was stored and the
    /// manager remains logged out.
    #[error("could not persist session: {0}")]
    Storage(#[source] anyhow::Error),
}
