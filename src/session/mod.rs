//! Client-side session state.
//!
//! One [`SessionStore`] exists per running client. It is the single source of
//! truth for "is a user signed in, and with what credential", and it is
//! injected explicitly into the HTTP layer and the route gate rather than
//! reached through any ambient lookup.
//!
//! Invariant: the store is authenticated exactly when it holds a non-empty
//! token. The flag is derived from the token, so the two cannot diverge.

pub mod storage;

use std::sync::{Arc, RwLock, Weak};

use crate::error::ApiError;
use crate::events::{AuthEvent, AuthEventBus, SubscriptionId};

use storage::{PersistedSession, SessionFile};

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    display_name: Option<String>,
}

pub struct SessionStore {
    state: RwLock<SessionState>,
    file: SessionFile,
}

impl SessionStore {
    pub fn new(file: SessionFile) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            file,
        }
    }

    /// Reloads a previously persisted session, restoring authentication
    /// without a fresh login. Called once at startup.
    pub fn restore(&self) {
        if let Some(PersistedSession {
            token,
            display_name,
        }) = self.file.load()
        {
            if token.is_empty() {
                return;
            }
            let mut state = self.state.write().expect("session store poisoned");
            state.token = Some(token);
            state.display_name = display_name;
            log::info!("restored persisted session");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        let state = self.state.read().expect("session store poisoned");
        state.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        let state = self.state.read().expect("session store poisoned");
        state.token.clone()
    }

    pub fn display_name(&self) -> Option<String> {
        let state = self.state.read().expect("session store poisoned");
        state.display_name.clone()
    }

    /// Stores a freshly issued credential and marks the session
    /// authenticated, in one state change. Empty tokens are rejected.
    pub fn establish(
        &self,
        token: String,
        display_name: Option<String>,
    ) -> Result<(), ApiError> {
        if token.is_empty() {
            return Err(ApiError::Validation("empty credential token".into()));
        }

        {
            let mut state = self.state.write().expect("session store poisoned");
            state.token = Some(token.clone());
            state.display_name = display_name.clone();
        }

        // Persistence is best-effort: a read-only disk must not block login.
        if let Err(err) = self.file.save(&PersistedSession {
            token,
            display_name,
        }) {
            log::warn!("could not persist session: {:#}", err);
        }
        Ok(())
    }

    /// Clears the credential and the persisted copy, unconditionally.
    /// Idempotent; safe to call from any thread, any number of times.
    pub fn sign_out(&self) {
        let was_authenticated = {
            let mut state = self.state.write().expect("session store poisoned");
            let had_token = state.token.take().is_some();
            state.display_name = None;
            had_token
        };

        if let Err(err) = self.file.clear() {
            log::warn!("could not clear persisted session: {:#}", err);
        }

        if was_authenticated {
            log::info!("session signed out");
        }
    }

    /// Subscribes this store to session-invalid events published by the HTTP
    /// layer. The returned id unsubscribes at teardown. The handler keeps a
    /// `Weak` reference, so dropping the store makes later events no-ops.
    pub fn attach(self: &Arc<Self>, bus: &AuthEventBus) -> SubscriptionId {
        let store: Weak<SessionStore> = Arc::downgrade(self);
        bus.subscribe(move |event| {
            if event == AuthEvent::SessionInvalid {
                if let Some(store) = store.upgrade() {
                    store.sign_out();
                }
            }
        })
    }
}

/// Derives the name shown in the header from the login, the way the
/// original client did: everything before the '@', first letter upper-cased.
pub fn display_name_for(login: &str) -> Option<String> {
    let base = login.split('@').next()?.trim();
    let mut chars = base.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + chars.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> Arc<SessionStore> {
        Arc::new(SessionStore::new(SessionFile::new(
            dir.path().join("session.json"),
        )))
    }

    #[test]
    fn test_establish_then_sign_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_authenticated());
        store
            .establish("tok-1".into(), Some("Nadia".into()))
            .unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.display_name().as_deref(), Some("Nadia"));

        store.sign_out();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(store.display_name().is_none());
    }

    #[test]
    fn test_sign_out_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.establish("tok".into(), None).unwrap();

        for _ in 0..5 {
            store.sign_out();
            assert!(!store.is_authenticated());
            assert!(store.token().is_none());
        }
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.establish(String::new(), None),
            Err(ApiError::Validation(_))
        ));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = store_in(&dir);
            store
                .establish("persisted".into(), Some("Ana".into()))
                .unwrap();
        }

        let store = store_in(&dir);
        assert!(!store.is_authenticated());
        store.restore();
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("persisted"));
        assert_eq!(store.display_name().as_deref(), Some("Ana"));
    }

    #[test]
    fn test_sign_out_clears_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.establish("tok".into(), None).unwrap();
        store.sign_out();

        let fresh = store_in(&dir);
        fresh.restore();
        assert!(!fresh.is_authenticated());
    }

    #[test]
    fn test_bus_event_tears_down_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let bus = AuthEventBus::new();
        let id = store.attach(&bus);

        store.establish("tok".into(), None).unwrap();
        bus.publish(AuthEvent::SessionInvalid);
        assert!(!store.is_authenticated());

        // Redundant publishes are safe.
        bus.publish(AuthEvent::SessionInvalid);
        assert!(!store.is_authenticated());

        bus.unsubscribe(id);
        store.establish("tok-2".into(), None).unwrap();
        bus.publish(AuthEvent::SessionInvalid);
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_display_name_for_login() {
        assert_eq!(display_name_for("nadia@gmail.com").as_deref(), Some("Nadia"));
        assert_eq!(display_name_for("ana").as_deref(), Some("Ana"));
        assert_eq!(display_name_for(""), None);
    }
}
