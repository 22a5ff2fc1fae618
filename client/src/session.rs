//! Process-wide session state with an explicit lifecycle.
//!
//! The session is initialised signed out, populated on login, refreshed when
//! profile fields change, and cleared on logout or when the backend rejects
//! the token. Each transition is broadcast so independent views can refresh
//! without polling shared storage.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::SessionError;

/// Buffered events per subscriber before older ones are dropped.
const EVENT_CAPACITY: usize = 16;

/// Cached fields describing the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Backend user identifier.
    pub user_id: String,
    /// Name shown in the interface.
    pub display_name: String,
    /// Backend role, such as `admin`, when the login response includes one.
    pub role: Option<String>,
}

impl SessionUser {
    /// Build user fields without a role.
    #[must_use]
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            role: None,
        }
    }

    /// Attach a backend role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// An authenticated session: bearer token plus cached user fields.
///
/// The token is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: Zeroizing<String>,
    user: SessionUser,
}

impl Session {
    /// Build a session from a login response.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] when `token` is blank.
    pub fn new(token: impl Into<String>, user: SessionUser) -> Result<Self, SessionError> {
        let secret = Zeroizing::new(token.into());
        if secret.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self {
            token: secret,
            user,
        })
    }

    /// Bearer token for outgoing requests.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Cached user fields.
    #[must_use]
    pub const fn user(&self) -> &SessionUser {
        &self.user
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Notification published on every session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established.
    SignedIn {
        /// Identifier of the user who signed in.
        user_id: String,
    },
    /// Cached user fields changed; the token did not.
    Updated {
        /// Identifier of the refreshed user.
        user_id: String,
    },
    /// The session was cleared.
    SignedOut,
}

/// Shared handle to the current session.
///
/// Clones observe and mutate the same state.
///
/// # Example
///
/// ```
/// use kemii_client::{Session, SessionEvent, SessionStore, SessionUser};
///
/// let store = SessionStore::new();
/// let mut events = store.subscribe();
///
/// let session = Session::new("token-123", SessionUser::new("42", "Ploy")).expect("token");
/// store.set(session);
///
/// assert!(store.is_signed_in());
/// assert_eq!(
///     events.try_recv().expect("event published"),
///     SessionEvent::SignedIn { user_id: "42".to_owned() }
/// );
/// ```
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<Option<Session>>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Create a signed-out store.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(None)),
            events,
        }
    }

    /// Snapshot of the current session, if signed in.
    #[must_use]
    pub fn get(&self) -> Option<Session> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return `true` while a session is held.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Current bearer token, if signed in.
    #[must_use]
    pub fn bearer_token(&self) -> Option<Zeroizing<String>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| Zeroizing::new(session.token().to_owned()))
    }

    /// Replace the current session, as after a login.
    pub fn set(&self, session: Session) {
        let user_id = session.user().user_id.clone();
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        debug!(%user_id, "session established");
        self.publish(SessionEvent::SignedIn { user_id });
    }

    /// Refresh cached user fields while keeping the token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SignedOut`] when no session is held.
    pub fn update_user(&self, user: SessionUser) -> Result<(), SessionError> {
        let user_id = user.user_id.clone();
        {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let session = guard.as_mut().ok_or(SessionError::SignedOut)?;
            session.user = user;
        }
        debug!(%user_id, "session user refreshed");
        self.publish(SessionEvent::Updated { user_id });
        Ok(())
    }

    /// Drop the current session, as on logout.
    ///
    /// Returns `true` when a session was held. Clearing an already
    /// signed-out store publishes nothing.
    #[must_use = "check whether a session was actually dropped"]
    pub fn clear(&self) -> bool {
        let previous = self
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_none() {
            return false;
        }
        debug!("session cleared");
        self.publish(SessionEvent::SignedOut);
        true
    }

    /// Subscribe to future session transitions.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("no session subscribers");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("signed_in", &self.is_signed_in())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    //! Lifecycle and notification coverage for the session store.

    use rstest::{fixture, rstest};
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;

    #[fixture]
    fn session() -> Session {
        Session::new(
            "secret-token",
            SessionUser::new("42", "Ploy").with_role("admin"),
        )
        .expect("valid session")
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_tokens(#[case] token: &str) {
        let result = Session::new(token, SessionUser::new("1", "Ann"));
        assert_eq!(result, Err(SessionError::EmptyToken));
    }

    #[rstest]
    fn debug_output_redacts_token(session: Session) {
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn new_store_is_signed_out() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in());
        assert!(store.get().is_none());
        assert!(store.bearer_token().is_none());
    }

    #[rstest]
    fn set_get_clear_round_trip(session: Session) {
        let store = SessionStore::new();
        store.set(session.clone());

        assert_eq!(store.get(), Some(session));
        assert_eq!(
            store.bearer_token().as_deref().map(String::as_str),
            Some("secret-token")
        );

        assert!(store.clear());
        assert!(!store.is_signed_in());
        assert!(!store.clear());
    }

    #[rstest]
    fn clones_share_state(session: Session) {
        let store = SessionStore::new();
        let other = store.clone();
        store.set(session);
        assert!(other.is_signed_in());
    }

    #[rstest]
    fn transitions_are_broadcast_in_order(session: Session) {
        let store = SessionStore::new();
        let mut events = store.subscribe();

        store.set(session);
        store
            .update_user(SessionUser::new("42", "Ploy S."))
            .expect("signed in");
        assert!(store.clear());
        assert!(!store.clear());

        assert_eq!(
            events.try_recv(),
            Ok(SessionEvent::SignedIn {
                user_id: "42".to_owned()
            })
        );
        assert_eq!(
            events.try_recv(),
            Ok(SessionEvent::Updated {
                user_id: "42".to_owned()
            })
        );
        assert_eq!(events.try_recv(), Ok(SessionEvent::SignedOut));
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[rstest]
    fn update_user_keeps_token(session: Session) {
        let store = SessionStore::new();
        store.set(session);

        store
            .update_user(SessionUser::new("42", "Renamed"))
            .expect("signed in");

        let current = store.get().expect("still signed in");
        assert_eq!(current.token(), "secret-token");
        assert_eq!(current.user().display_name, "Renamed");
        assert_eq!(current.user().role, None);
    }

    #[test]
    fn update_user_requires_session() {
        let store = SessionStore::new();
        assert_eq!(
            store.update_user(SessionUser::new("1", "Ann")),
            Err(SessionError::SignedOut)
        );
    }

    #[rstest]
    fn publishing_without_subscribers_is_harmless(session: Session) {
        let store = SessionStore::new();
        store.set(session);
        assert!(store.is_signed_in());
    }
}
