//! Session-level state: phase machine and player identity

mod identity;
mod phase;

pub use identity::PlayerIdentity;
pub use phase::{PhaseError, SessionPhase, SessionState};
