//! Backend REST API client
//!
//! Thin JSON wrappers over the backend's HTTP endpoints. The backend owns
//! all game logic; this module only shapes requests, carries session
//! cookies, and turns non-2xx responses into errors holding the backend's
//! `detail` message.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    ActionOutcome, BountyInfo, CreateWorldRequest, SessionInfo, WorldSummary, WorldTemplate,
};
