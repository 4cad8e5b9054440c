//! Outbound frames sent from the client to the backend gateway
//!
//! Fire-and-forget commands (chat, heartbeat) go out as bare frames.
//! Anything that needs a reply is wrapped in `ClientMessage::Request` with a
//! client-generated `request_id`; the gateway answers with a
//! `ServerEvent::Response` carrying the same id. Correlation is by id, never
//! by arrival order, because responses interleave with push events.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, PlayerId, WorldId};

/// Chat channel selector for outbound chat frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatChannel {
    Land,
    Global,
}

/// Messages from client to the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Send a chat line on the given channel
    SendChat { channel: ChatChannel, text: String },
    /// Send a direct message to another player
    SendDm { to: PlayerId, text: String },
    /// Connection liveness ping
    Heartbeat,
    /// Request expecting a correlated `ServerEvent::Response`
    Request {
        request_id: String,
        payload: RequestPayload,
    },
}

/// Payloads for the request/response pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RequestPayload {
    /// Bind a character and join a world session
    JoinWorld {
        world_id: WorldId,
        character_id: CharacterId,
    },
    /// Leave the active world session
    LeaveWorld,
    /// Submit a free-text game command for narrative resolution
    SubmitCommand { command: String },
}
