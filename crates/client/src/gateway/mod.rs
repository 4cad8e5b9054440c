//! Gateway consumer - the single live push-channel connection
//!
//! One `Gateway` per session owns the WebSocket connection to the backend.
//! Everything else talks to the gateway through its buses:
//!
//! - `CommandBus` sends outbound frames and correlates request/response
//!   pairs by request id
//! - `EventBus` fans inbound push events out to subscribers in receipt order
//!
//! Acquire on entering a phase that needs live updates, release with
//! [`GatewayHandle::disconnect`] (or by dropping the last handle). After
//! teardown no subscriber callback fires.

mod backoff;
mod bridge;
mod command_bus;
mod event_bus;
mod events;
mod socket;
mod state;

pub use backoff::Backoff;
pub use bridge::{connect, Gateway};
pub use command_bus::{BusMessage, CommandBus, PendingRequests};
pub use event_bus::EventBus;
pub use events::{translate, ChatScope, PushEvent};
pub use state::{GatewayHandle, GatewayState, GatewayStateObserver};
