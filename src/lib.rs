//! Client crate for the Cantina canteen-management backend.
//!
//! The pieces are wired explicitly: a [`session::SessionStore`] holds the
//! authentication state, the [`api::ApiClient`] attaches its token to every
//! request and publishes on the [`events::AuthEventBus`] when the backend
//! invalidates the session, and [`routes::resolve`] gates navigation on the
//! live session state. [`dashboard`] derives summary metrics from in-memory
//! financial records.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod models;
pub mod routes;
pub mod session;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::events::AuthEventBus;
use crate::session::storage::SessionFile;
use crate::session::SessionStore;

/// The wired-up application context: session store, event bus and HTTP
/// client, with the store subscribed to session-invalid events for as long
/// as the context lives.
pub struct App {
    pub session: Arc<SessionStore>,
    pub events: Arc<AuthEventBus>,
    pub client: ApiClient,
    subscription: events::SubscriptionId,
}

impl App {
    /// Builds the context from a config and restores any persisted session.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let session = Arc::new(SessionStore::new(SessionFile::new(
            config.session_file.clone(),
        )));
        session.restore();

        let events = Arc::new(AuthEventBus::new());
        let subscription = session.attach(&events);

        let client = ApiClient::new(config, session.clone(), events.clone())?;
        Ok(Self {
            session,
            events,
            client,
            subscription,
        })
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.events.unsubscribe(self.subscription);
    }
}
