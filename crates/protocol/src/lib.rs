//! Textlands Protocol - Wire types shared between the client and the backend gateway
//!
//! This crate contains the vocabulary of the real-time push channel and the
//! request/response envelope carried over it:
//! - Typed entity identifiers
//! - Push event frames (`ServerEvent`)
//! - Outbound client frames (`ClientMessage`, `RequestPayload`)
//! - Request/response result types (`ResponseResult`, `ErrorCode`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, uuid, chrono, thiserror
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Forward compatible** - Unknown wire tags deserialize to `Unknown`
//!    variants instead of failing; the backend may add event types at any time

pub mod events;
pub mod ids;
pub mod requests;
pub mod responses;

pub use events::ServerEvent;
pub use ids::{CharacterId, LandId, PlayerId, WorldId};
pub use requests::{ChatChannel, ClientMessage, RequestPayload};
pub use responses::{ErrorCode, RequestError, ResponseResult};
