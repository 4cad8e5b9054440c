//! Gateway connection state observation and disconnect control

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

/// Connection state of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayState {
    /// Not connected to the gateway
    Disconnected,
    /// Attempting to establish the connection
    Connecting,
    /// Successfully connected
    Connected,
    /// Connection lost, attempting to reconnect
    Reconnecting,
    /// Connection failed (reconnect attempts exhausted)
    Failed,
}

impl GatewayState {
    /// Convert to u8 for atomic storage.
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            GatewayState::Disconnected => 0,
            GatewayState::Connecting => 1,
            GatewayState::Connected => 2,
            GatewayState::Reconnecting => 3,
            GatewayState::Failed => 4,
        }
    }

    /// Convert from u8 (atomic storage).
    pub(crate) fn from_u8(v: u8) -> Self {
        match v {
            1 => GatewayState::Connecting,
            2 => GatewayState::Connected,
            3 => GatewayState::Reconnecting,
            4 => GatewayState::Failed,
            _ => GatewayState::Disconnected,
        }
    }
}

/// Handle controlling the gateway connection lifecycle.
///
/// [`disconnect`](Self::disconnect) consumes the handle since a closed
/// connection cannot be reused - create a new gateway to reconnect.
/// Dropping the handle also tears the connection down; release is
/// guaranteed whether teardown comes from a normal transition or an error.
pub struct GatewayHandle {
    state: Arc<AtomicU8>,
    disconnect_tx: Option<oneshot::Sender<()>>,
}

impl GatewayHandle {
    pub(crate) fn new(state: Arc<AtomicU8>, disconnect_tx: oneshot::Sender<()>) -> Self {
        Self {
            state,
            disconnect_tx: Some(disconnect_tx),
        }
    }

    pub fn state(&self) -> GatewayState {
        GatewayState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == GatewayState::Connected
    }

    /// Request disconnect. The connection may not close immediately; poll
    /// an observer to verify.
    pub fn disconnect(mut self) {
        if let Some(tx) = self.disconnect_tx.take() {
            let _ = tx.send(());
        }
    }

    pub(crate) fn state_arc(&self) -> Arc<AtomicU8> {
        Arc::clone(&self.state)
    }
}

/// Observable connection state for binding into UI without owning the
/// handle. Many observers may share the same underlying state.
#[derive(Clone)]
pub struct GatewayStateObserver {
    state: Arc<AtomicU8>,
}

impl GatewayStateObserver {
    pub fn from_handle(handle: &GatewayHandle) -> Self {
        Self {
            state: handle.state_arc(),
        }
    }

    pub(crate) fn new(state: Arc<AtomicU8>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> GatewayState {
        GatewayState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == GatewayState::Connected
    }
}

/// Update the shared connection state (bridge internal).
pub(crate) fn set_gateway_state(state_ref: &AtomicU8, new_state: GatewayState) {
    state_ref.store(new_state.to_u8(), Ordering::SeqCst);
}
