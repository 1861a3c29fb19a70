use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use summit_client::{Backend, ClientError};
use summit_types::api::AuthUser;

use crate::error::AuthError;
use crate::permissions::{Role, role_has_capability};
use crate::store::{FileSessionStore, SessionStore, StoredSession};

/// A live logged-in identity: the bearer credential, its expiry, and the
/// user it represents.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Epoch seconds after which the access token is no longer valid.
    pub expires_at: i64,
    pub user: AuthUser,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.user.role_name().and_then(Role::from_name)
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    fn from_stored(stored: StoredSession) -> Self {
        Self {
            access_token: stored.access_token,
            refresh_token: stored.refresh_token,
            expires_at: stored.expires_at,
            user: stored.user,
        }
    }

    fn to_stored(&self) -> StoredSession {
        StoredSession {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expires_at,
            user: self.user.clone(),
        }
    }
}

struct AuthState {
    session: Option<Session>,
    /// True until the initial `restore()` has run to completion, so callers
    /// can tell "still determining auth state" from "definitely logged out".
    loading: bool,
    /// Bumped by `logout()`. An in-flight login only lands if the generation
    /// it started under is still current.
    generation: u64,
}

/// Owns the logged-in identity. Single writer: only this type mutates
/// session state; everything else reads through the accessors.
///
/// There is no automatic token refresh. A token that expires while the
/// manager is logged in is left to downstream request failures; expiry is
/// only checked when restoring a persisted record at startup.
pub struct SessionManager {
    backend: Backend,
    store: Arc<dyn SessionStore>,
    state: RwLock<AuthState>,
}

impl SessionManager {
    pub fn new(backend: Backend, store: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            store,
            state: RwLock::new(AuthState {
                session: None,
                loading: true,
                generation: 0,
            }),
        }
    }

    /// Manager backed by a JSON session file at `path`.
    pub fn with_file_store(backend: Backend, path: impl Into<PathBuf>) -> Self {
        Self::new(backend, Arc::new(FileSessionStore::new(path.into())))
    }

    /// Adopt a persisted session, if there is a live one. Run once at
    /// process start; makes no network calls.
    ///
    /// An absent record leaves the manager logged out. An expired record is
    /// discarded from the store. A record that fails to load (corrupt file)
    /// counts as "no session" — startup never fails here. In every case the
    /// loading flag drops only after the outcome is settled.
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.store.load() {
            Ok(Some(stored)) => {
                let session = Session::from_stored(stored);
                if session.is_expired_at(Utc::now().timestamp()) {
                    info!("persisted session expired, discarding");
                    if let Err(e) = self.store.clear() {
                        warn!("could not discard expired session record: {e:#}");
                    }
                    None
                } else {
                    debug!(role = ?session.role(), "restored persisted session");
                    Some(session)
                }
            }
            Ok(None) => None,
            Err(e) => {
                warn!("could not restore session, treating as logged out: {e:#}");
                None
            }
        };

        let mut state = self.state.write();
        state.session = restored.clone();
        state.loading = false;
        restored
    }

    /// Exchange credentials for a session, persist it, and adopt it.
    ///
    /// A rejected login surfaces the server's message as
    /// `AuthError::Credentials`; a transport failure as `Network`. Neither
    /// is retried. The record is persisted atomically: if the write fails,
    /// nothing is stored and the manager stays logged out.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let generation = self.state.read().generation;

        let token = self
            .backend
            .auth_password_grant(email, password)
            .await
            .map_err(|e| match e {
                ClientError::Api { message, .. } => AuthError::Credentials(message),
                other => AuthError::Network(other),
            })?;

        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now().timestamp() + token.expires_in,
            user: token.user,
        };

        let mut state = self.state.write();
        if state.generation != generation {
            debug!("discarding login response that arrived after logout");
            return Err(AuthError::Superseded);
        }

        self.store
            .save(&session.to_stored())
            .map_err(AuthError::Storage)?;
        state.session = Some(session.clone());
        state.loading = false;

        info!(email, role = ?session.role(), "logged in");
        Ok(session)
    }

    /// Clear the persisted record and reset in-memory state. Never fails; a
    /// store error is logged and the in-memory session is dropped anyway.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            warn!("could not clear persisted session record: {e:#}");
        }

        let mut state = self.state.write();
        state.generation += 1;
        state.session = None;

        info!("logged out");
    }

    /// Pure check over the current role and the static capability table.
    /// False when logged out or when the role string is unknown.
    pub fn has_permission(&self, capability: &str) -> bool {
        self.role()
            .is_some_and(|role| role_has_capability(role, capability))
    }

    pub fn session(&self) -> Option<Session> {
        self.state.read().session.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.read().session.as_ref().and_then(Session::role)
    }

    pub fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .session
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().session.is_some()
    }

    /// True until the initial `restore()` has completed.
    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }
}
