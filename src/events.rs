//! Auth event bus.
//!
//! The HTTP layer has no reference to the session store, but it is the first
//! place an invalidated session becomes visible (any endpoint may answer 401
//! at any time). It publishes [`AuthEvent::SessionInvalid`] here; the session
//! store subscribes at startup and tears the session down in response.

use std::sync::Mutex;

/// Events published by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// The backend rejected the current credential (401 after login).
    SessionInvalid,
}

/// Handle returned by [`AuthEventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: u64,
    handler: Box<dyn Fn(AuthEvent) + Send + Sync>,
}

/// A minimal synchronous observer registry.
///
/// Publishing runs every handler on the publishing thread; handlers must be
/// cheap and must not publish back into the bus.
#[derive(Default)]
pub struct AuthEventBus {
    inner: Mutex<BusState>,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(AuthEvent) + Send + Sync + 'static,
    {
        let mut state = self.inner.lock().expect("auth event bus poisoned");
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push(Subscriber {
            id,
            handler: Box::new(handler),
        });
        SubscriptionId(id)
    }

    /// Removes a subscriber. Unknown ids are ignored, so teardown is
    /// idempotent.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut state = self.inner.lock().expect("auth event bus poisoned");
        state.subscribers.retain(|s| s.id != id.0);
    }

    pub fn publish(&self, event: AuthEvent) {
        let state = self.inner.lock().expect("auth event bus poisoned");
        log::debug!(
            "publishing auth event {:?} to {} subscriber(s)",
            event,
            state.subscribers.len()
        );
        for subscriber in &state.subscribers {
            (subscriber.handler)(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let bus = AuthEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            bus.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.publish(AuthEvent::SessionInvalid);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = AuthEventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let id = {
            let hits = hits.clone();
            bus.subscribe(move |_| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        bus.publish(AuthEvent::SessionInvalid);
        bus.unsubscribe(id);
        bus.unsubscribe(id);
        bus.publish(AuthEvent::SessionInvalid);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
