//! Gateway bridge - wires the buses to the socket and owns reconnection
//!
//! `connect()` spawns a background task that:
//! - establishes the socket and flips the shared state through
//!   `Connecting -> Connected`
//! - pumps outbound frames from the `CommandBus` queue
//! - parses inbound frames, resolves pending requests, and dispatches push
//!   events to the `EventBus` in receipt order
//! - on unexpected closure, cancels all pending requests and reconnects
//!   with capped, jittered exponential backoff
//! - on disconnect request (or handle drop), closes the socket and clears
//!   all subscribers so no callback fires after teardown

use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use tokio::sync::{mpsc, oneshot, Mutex};
use url::Url;

use textlands_protocol::ClientMessage;

use super::backoff::Backoff;
use super::command_bus::{BusMessage, CommandBus, PendingRequests, OUTBOUND_QUEUE_CAPACITY};
use super::event_bus::EventBus;
use super::events::translate;
use super::socket::GatewaySocket;
use super::state::{set_gateway_state, GatewayHandle, GatewayState, GatewayStateObserver};

/// A live gateway connection.
///
/// - `command_bus`: send frames and make requests
/// - `event_bus`: subscribe to push events
/// - `handle`: control the connection lifecycle
/// - `state_observer`: observe connection state (for UI binding)
pub struct Gateway {
    pub command_bus: CommandBus,
    pub event_bus: EventBus,
    pub handle: GatewayHandle,
    pub state_observer: GatewayStateObserver,
}

/// Begin connecting to the gateway at `url` (`ws://` or `wss://`).
///
/// Returns immediately; the connection proceeds in a background task.
/// Watch the `state_observer` to learn when it is usable.
pub fn connect(url: &str) -> Result<Gateway> {
    let parsed = Url::parse(url).with_context(|| format!("invalid gateway url: {url}"))?;
    ensure!(
        matches!(parsed.scheme(), "ws" | "wss"),
        "gateway url must be ws:// or wss://, got {}",
        parsed.scheme()
    );

    let (cmd_tx, cmd_rx) = mpsc::channel::<BusMessage>(OUTBOUND_QUEUE_CAPACITY);
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();

    let pending = Arc::new(Mutex::new(PendingRequests::default()));
    let state = Arc::new(AtomicU8::new(GatewayState::Disconnected.to_u8()));

    let command_bus = CommandBus::new(cmd_tx, Arc::clone(&pending), Arc::clone(&state));
    let event_bus = EventBus::new();
    let state_observer = GatewayStateObserver::new(Arc::clone(&state));

    let event_bus_for_bridge = event_bus.clone();
    let state_for_bridge = Arc::clone(&state);
    let url_for_bridge = parsed.to_string();

    tokio::spawn(async move {
        bridge_task(
            url_for_bridge,
            cmd_rx,
            disconnect_rx,
            event_bus_for_bridge,
            state_for_bridge,
            pending,
        )
        .await;
    });

    let handle = GatewayHandle::new(Arc::clone(&state), disconnect_tx);

    Ok(Gateway {
        command_bus,
        event_bus,
        handle,
        state_observer,
    })
}

enum IoOutcome {
    /// Disconnect was requested (or every handle/bus was dropped)
    DisconnectRequested,
    /// The socket dropped out from under us
    ConnectionLost,
}

async fn bridge_task(
    url: String,
    mut cmd_rx: mpsc::Receiver<BusMessage>,
    mut disconnect_rx: oneshot::Receiver<()>,
    event_bus: EventBus,
    state: Arc<AtomicU8>,
    pending: Arc<Mutex<PendingRequests>>,
) {
    let mut backoff = Backoff::default();
    set_gateway_state(&state, GatewayState::Connecting);

    loop {
        match GatewaySocket::connect(&url).await {
            Ok(socket) => {
                backoff.reset();
                set_gateway_state(&state, GatewayState::Connected);

                let outcome = io_loop(
                    socket,
                    &mut cmd_rx,
                    &mut disconnect_rx,
                    &event_bus,
                    &pending,
                )
                .await;

                // At-most-once: anything still pending at teardown resolves
                // as Cancelled for its waiter.
                let cancelled = pending.lock().await.clear();
                if cancelled > 0 {
                    tracing::debug!(cancelled, "cancelled pending requests on connection loss");
                }

                match outcome {
                    IoOutcome::DisconnectRequested => {
                        set_gateway_state(&state, GatewayState::Disconnected);
                        break;
                    }
                    IoOutcome::ConnectionLost => {
                        set_gateway_state(&state, GatewayState::Reconnecting);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, attempt = backoff.attempts(), "gateway connect failed");
                set_gateway_state(&state, GatewayState::Reconnecting);
            }
        }

        match backoff.next_jittered_delay_and_advance() {
            Some(delay_ms) => {
                tracing::info!(delay_ms, "waiting before reconnect attempt");
                tokio::select! {
                    _ = &mut disconnect_rx => {
                        set_gateway_state(&state, GatewayState::Disconnected);
                        break;
                    }
                    _ = tokio::time::sleep(std::time::Duration::from_millis(delay_ms)) => {}
                }
            }
            None => {
                tracing::error!("reconnect attempts exhausted, giving up");
                set_gateway_state(&state, GatewayState::Failed);
                break;
            }
        }
    }

    // Teardown guarantee: no subscriber callback fires after this point.
    event_bus.clear().await;
}

async fn io_loop(
    mut socket: GatewaySocket,
    cmd_rx: &mut mpsc::Receiver<BusMessage>,
    disconnect_rx: &mut oneshot::Receiver<()>,
    event_bus: &EventBus,
    pending: &Arc<Mutex<PendingRequests>>,
) -> IoOutcome {
    loop {
        tokio::select! {
            _ = &mut *disconnect_rx => {
                tracing::info!("disconnect requested");
                socket.close().await;
                return IoOutcome::DisconnectRequested;
            }

            maybe_cmd = cmd_rx.recv() => {
                let Some(bus_msg) = maybe_cmd else {
                    // Every CommandBus clone is gone; nothing left to serve.
                    socket.close().await;
                    return IoOutcome::DisconnectRequested;
                };
                let frame = match bus_msg {
                    BusMessage::Send(msg) => msg,
                    BusMessage::Request { id, payload } => ClientMessage::Request {
                        request_id: id,
                        payload,
                    },
                };
                if let Err(e) = socket.send(&frame).await {
                    tracing::error!(error = %e, "send failed, dropping connection");
                    return IoOutcome::ConnectionLost;
                }
            }

            frame = socket.next_event() => {
                match frame {
                    Some(Ok(textlands_protocol::ServerEvent::Response { request_id, result })) => {
                        pending.lock().await.resolve(&request_id, result);
                    }
                    Some(Ok(event)) => {
                        if let Some(push) = translate(event) {
                            event_bus.dispatch(push).await;
                        }
                    }
                    Some(Err(e)) => {
                        // A malformed frame is skipped, not fatal
                        tracing::warn!(error = %e, "failed to parse gateway frame");
                    }
                    None => return IoOutcome::ConnectionLost,
                }
            }
        }
    }
}
