//! Textlands Client - the client-side core of the Textlands game
//!
//! This crate owns the pieces of client state that have contract-shaped
//! behavior, independent of any rendering layer:
//!
//! - [`session`] - the phase machine routing which top-level view is active,
//!   with precondition-gated transitions and a connection-error side channel
//! - [`gateway`] - the single live push-channel connection: typed event
//!   fan-out, request/response correlation, reconnect with capped backoff
//! - [`api`] - thin JSON client over the backend REST surface
//! - [`prefs`] - defensive read-through/write-through preference cache
//! - [`state`] - per-domain live state containers fed by gateway events
//!
//! Game logic (combat, narrative, world simulation) lives in the backend;
//! nothing here resolves an action, it only transports and tracks.

pub mod api;
pub mod gateway;
pub mod prefs;
pub mod session;
pub mod state;

pub use gateway::{Gateway, GatewayState, PushEvent};
pub use session::{PlayerIdentity, SessionPhase, SessionState};
