//! Event bus fanning push events out to subscribers
//!
//! Push-based: subscribers register callbacks invoked as events arrive,
//! strictly in receipt order. The bus holds strong references to
//! subscribers until `clear()` or drop; the bridge clears it on teardown so
//! no callback fires after disconnect.

use std::sync::Arc;
use tokio::sync::Mutex;

use super::events::PushEvent;

type Subscriber = Box<dyn FnMut(PushEvent) + Send + 'static>;

/// Event bus for receiving gateway push events.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to all events. The callback is invoked for every event
    /// dispatched after registration.
    pub async fn subscribe(&self, callback: impl FnMut(PushEvent) + Send + 'static) {
        self.subscribers.lock().await.push(Box::new(callback));
    }

    /// Dispatch an event to all subscribers, in registration order.
    ///
    /// Called by the bridge as frames arrive; one dispatch completes before
    /// the next starts, so per-subscriber delivery order matches receipt
    /// order.
    pub async fn dispatch(&self, event: PushEvent) {
        let mut subscribers = self.subscribers.lock().await;
        for subscriber in subscribers.iter_mut() {
            subscriber(event.clone());
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Remove all subscribers. After this returns no callback fires again.
    pub async fn clear(&self) {
        self.subscribers.lock().await.clear();
    }
}
