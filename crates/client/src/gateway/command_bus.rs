//! Command bus for sending frames to the gateway
//!
//! Supports fire-and-forget sends and the request/response pattern.
//! Sends fail fast: while the connection is down they return
//! `NotConnected`, and the outbound queue is bounded, so a stalled
//! connection surfaces as `SendFailed` instead of buffering silently.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};

use textlands_protocol::{ClientMessage, RequestError, RequestPayload, ResponseResult};

use super::state::GatewayState;

/// Capacity of the outbound queue. A full queue is a send error, not a
/// silent buffer.
pub(crate) const OUTBOUND_QUEUE_CAPACITY: usize = 32;

/// Message types sent through the command bus to the bridge.
#[derive(Debug)]
pub enum BusMessage {
    /// Fire-and-forget command
    Send(ClientMessage),
    /// Request expecting a response (resolved via `PendingRequests`)
    Request { id: String, payload: RequestPayload },
}

/// Pending request tracker for request/response correlation.
///
/// Dropping a sender (via `clear` on disconnect) resolves the waiting
/// caller with `Cancelled` - the at-most-once contract.
#[derive(Default)]
pub struct PendingRequests {
    inner: HashMap<String, oneshot::Sender<ResponseResult>>,
}

impl PendingRequests {
    pub fn insert(&mut self, request_id: String, tx: oneshot::Sender<ResponseResult>) {
        self.inner.insert(request_id, tx);
    }

    /// Resolve a pending request with a response.
    ///
    /// Returns false if no pending request exists for this id (e.g., it
    /// already timed out and was cleaned up).
    pub fn resolve(&mut self, request_id: &str, result: ResponseResult) -> bool {
        if let Some(tx) = self.inner.remove(request_id) {
            let _ = tx.send(result);
            true
        } else {
            tracing::debug!(
                request_id = %request_id,
                "response for unknown request id - request may have timed out"
            );
            false
        }
    }

    pub fn remove(&mut self, request_id: &str) -> bool {
        self.inner.remove(request_id).is_some()
    }

    /// Drop all pending requests; their waiters see `Cancelled`.
    pub fn clear(&mut self) -> usize {
        let count = self.inner.len();
        self.inner.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Command bus for sending frames to the gateway.
///
/// Cloneable; all clones share the same outbound queue and pending map.
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::Sender<BusMessage>,
    pending: Arc<Mutex<PendingRequests>>,
    state: Arc<AtomicU8>,
}

impl CommandBus {
    pub(crate) fn new(
        tx: mpsc::Sender<BusMessage>,
        pending: Arc<Mutex<PendingRequests>>,
        state: Arc<AtomicU8>,
    ) -> Self {
        Self { tx, pending, state }
    }

    fn check_connected(&self) -> Result<(), RequestError> {
        if GatewayState::from_u8(self.state.load(Ordering::SeqCst)) != GatewayState::Connected {
            return Err(RequestError::NotConnected);
        }
        Ok(())
    }

    fn enqueue(&self, msg: BusMessage) -> Result<(), RequestError> {
        use mpsc::error::TrySendError;
        self.tx.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => RequestError::SendFailed("outbound queue full".into()),
            TrySendError::Closed(_) => RequestError::SendFailed("gateway task gone".into()),
        })
    }

    /// Send a fire-and-forget command.
    ///
    /// Fails immediately when disconnected or when the bounded outbound
    /// queue is full.
    pub fn send(&self, message: ClientMessage) -> Result<(), RequestError> {
        self.check_connected()?;
        self.enqueue(BusMessage::Send(message))
    }

    /// Send a request and await the correlated response.
    pub async fn request(&self, payload: RequestPayload) -> Result<ResponseResult, RequestError> {
        let (_id, response_rx) = self.request_internal(payload).await?;
        response_rx.await.map_err(|_| RequestError::Cancelled)
    }

    async fn request_internal(
        &self,
        payload: RequestPayload,
    ) -> Result<(String, oneshot::Receiver<ResponseResult>), RequestError> {
        self.check_connected()?;

        let id = uuid::Uuid::new_v4().to_string();
        let (response_tx, response_rx) = oneshot::channel();

        // Register before sending so a fast response always finds the entry
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), response_tx);
        }

        if let Err(e) = self.enqueue(BusMessage::Request {
            id: id.clone(),
            payload,
        }) {
            let mut pending = self.pending.lock().await;
            pending.remove(&id);
            return Err(e);
        }

        Ok((id, response_rx))
    }

    /// Send a request with a client-side timeout.
    ///
    /// On timeout the pending entry is removed so a late response does not
    /// leak it.
    pub async fn request_with_timeout(
        &self,
        payload: RequestPayload,
        timeout_ms: u64,
    ) -> Result<ResponseResult, RequestError> {
        let (id, response_rx) = self.request_internal(payload).await?;

        match tokio::time::timeout(std::time::Duration::from_millis(timeout_ms), response_rx).await
        {
            Ok(result) => result.map_err(|_| RequestError::Cancelled),
            Err(_) => {
                {
                    let mut pending = self.pending.lock().await;
                    pending.remove(&id);
                }
                tracing::debug!(request_id = %id, timeout_ms, "request timed out");
                Err(RequestError::Timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::state::set_gateway_state;

    fn connected_bus(capacity: usize) -> (CommandBus, mpsc::Receiver<BusMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        let pending = Arc::new(Mutex::new(PendingRequests::default()));
        let state = Arc::new(AtomicU8::new(GatewayState::Connected.to_u8()));
        (CommandBus::new(tx, pending, state), rx)
    }

    #[tokio::test]
    async fn send_fails_fast_when_disconnected() {
        let (tx, _rx) = mpsc::channel(4);
        let pending = Arc::new(Mutex::new(PendingRequests::default()));
        let state = Arc::new(AtomicU8::new(GatewayState::Reconnecting.to_u8()));
        let bus = CommandBus::new(tx, pending, Arc::clone(&state));

        assert_eq!(
            bus.send(ClientMessage::Heartbeat),
            Err(RequestError::NotConnected)
        );

        set_gateway_state(&state, GatewayState::Connected);
        assert!(bus.send(ClientMessage::Heartbeat).is_ok());
    }

    #[tokio::test]
    async fn full_queue_is_a_send_error() {
        let (bus, _rx) = connected_bus(1);
        assert!(bus.send(ClientMessage::Heartbeat).is_ok());
        assert!(matches!(
            bus.send(ClientMessage::Heartbeat),
            Err(RequestError::SendFailed(_))
        ));
    }

    #[tokio::test]
    async fn request_resolves_via_pending_map() {
        let (bus, mut rx) = connected_bus(4);
        let pending = Arc::clone(&bus.pending);

        let request = tokio::spawn({
            let bus = bus.clone();
            async move {
                bus.request(RequestPayload::SubmitCommand {
                    command: "look".into(),
                })
                .await
            }
        });

        // Bridge side: pull the frame, then resolve by id
        let id = match rx.recv().await {
            Some(BusMessage::Request { id, .. }) => id,
            other => panic!("unexpected bus message: {other:?}"),
        };
        pending
            .lock()
            .await
            .resolve(&id, ResponseResult::success_empty());

        let result = request.await.expect("join").expect("response");
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn clearing_pending_cancels_waiters() {
        let (bus, mut rx) = connected_bus(4);
        let pending = Arc::clone(&bus.pending);

        let request = tokio::spawn({
            let bus = bus.clone();
            async move { bus.request(RequestPayload::LeaveWorld).await }
        });

        // Wait until the frame is on the queue, then simulate disconnect
        let _ = rx.recv().await;
        pending.lock().await.clear();

        assert_eq!(
            request.await.expect("join"),
            Err(RequestError::Cancelled)
        );
    }

    #[tokio::test]
    async fn timeout_cleans_up_pending_entry() {
        let (bus, mut _rx) = connected_bus(4);
        let pending = Arc::clone(&bus.pending);

        let result = bus
            .request_with_timeout(RequestPayload::LeaveWorld, 10)
            .await;
        assert_eq!(result, Err(RequestError::Timeout));
        assert!(pending.lock().await.is_empty());
    }
}
