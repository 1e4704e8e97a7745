//! Notifications raised to subscribers and the registry that holds them.
//!
//! Listeners are plain closures keyed by a [`SubscriptionId`]. Dispatch
//! re-reads the registry before every single notification, so removing a
//! listener (even from inside a listener) takes effect before the next one.

use std::sync::{Arc, Mutex};
use tictactoe_sync_core::{Board, Outcome};

/// Notifications emitted by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The area model changed in any way.
    GameUpdated,
    /// The game went from in progress to over. `None` if the local
    /// participant's result could not be computed.
    GameEnd(Option<Outcome>),
    /// Board contents changed; carries the new board.
    BoardChanged(Board),
    /// Whether it is our turn changed; carries the new value.
    TurnChanged(bool),
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&GameEvent) + Send + Sync>;

/// Registry of event listeners.
#[derive(Clone, Default)]
pub struct EventListeners {
    inner: Arc<Mutex<ListenersInner>>,
}

#[derive(Default)]
struct ListenersInner {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl EventListeners {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives every event emitted after this call.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|(entry, _)| *entry != id);
        inner.entries.len() != before
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver one event to every listener registered right now.
    ///
    /// The lock is released before listeners run so they may subscribe or
    /// unsubscribe.
    pub fn emit(&self, event: &GameEvent) {
        let current: Vec<Listener> = self
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in current {
            listener(event);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ListenersInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListeners")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(listeners: &EventListeners) -> (SubscriptionId, Arc<Mutex<Vec<GameEvent>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let id = listeners.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (id, log)
    }

    #[test]
    fn subscribers_receive_events() {
        let listeners = EventListeners::new();
        let (_, log) = recorder(&listeners);

        listeners.emit(&GameEvent::TurnChanged(true));
        listeners.emit(&GameEvent::GameUpdated);

        assert_eq!(
            *log.lock().unwrap(),
            vec![GameEvent::TurnChanged(true), GameEvent::GameUpdated]
        );
    }

    #[test]
    fn unsubscribed_listener_receives_nothing() {
        let listeners = EventListeners::new();
        let (id, log) = recorder(&listeners);

        assert!(listeners.unsubscribe(id));
        listeners.emit(&GameEvent::GameUpdated);

        assert!(log.lock().unwrap().is_empty());
        assert!(listeners.is_empty());
    }

    #[test]
    fn unsubscribe_unknown_id_returns_false() {
        let listeners = EventListeners::new();
        let (id, _) = recorder(&listeners);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
    }

    #[test]
    fn ids_are_unique() {
        let listeners = EventListeners::new();
        let (a, _) = recorder(&listeners);
        let (b, _) = recorder(&listeners);
        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn listener_can_unsubscribe_itself_before_next_event() {
        let listeners = EventListeners::new();
        let count = Arc::new(Mutex::new(0));
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let registry = listeners.clone();
        let counter = Arc::clone(&count);
        let own_id = Arc::clone(&slot);
        let id = listeners.subscribe(move |_| {
            *counter.lock().unwrap() += 1;
            if let Some(id) = *own_id.lock().unwrap() {
                registry.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);

        listeners.emit(&GameEvent::GameUpdated);
        listeners.emit(&GameEvent::GameUpdated);

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn debug_shows_listener_count() {
        let listeners = EventListeners::new();
        let _ = recorder(&listeners);
        assert_eq!(format!("{:?}", listeners), "EventListeners { listeners: 1 }");
    }
}
