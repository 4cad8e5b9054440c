//! Application-layer push events and the wire-to-app translation step
//!
//! Wire frames (`ServerEvent`) stay in the protocol crate; subscribers see
//! `PushEvent`, which drops the frames the bridge already consumed
//! (`Response`) and the ones consumers must ignore (`Unknown`).

use chrono::{DateTime, Utc};
use textlands_protocol::{LandId, PlayerId, ServerEvent, WorldId};

/// Which chat surface a message belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatScope {
    /// The player's current play session
    Session,
    /// A specific land
    Land(LandId),
    /// The global channel
    Global,
}

/// Typed push event delivered to gateway subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    Chat {
        scope: ChatScope,
        sender: String,
        text: String,
        sent_at: DateTime<Utc>,
    },
    FriendOnline {
        player_id: PlayerId,
        name: String,
    },
    FriendOffline {
        player_id: PlayerId,
    },
    FriendRequest {
        from_id: PlayerId,
        from_name: String,
    },
    DirectMessage {
        from_id: PlayerId,
        from_name: String,
        text: String,
        sent_at: DateTime<Utc>,
    },
    WorldChatter {
        world_id: WorldId,
        text: String,
    },
}

/// Translate a wire frame into a subscriber-facing event.
///
/// Returns `None` for frames that are not for subscribers: responses (the
/// bridge resolves those against pending requests) and unknown future tags.
pub fn translate(event: ServerEvent) -> Option<PushEvent> {
    match event {
        ServerEvent::ChatMessage {
            sender,
            text,
            sent_at,
        } => Some(PushEvent::Chat {
            scope: ChatScope::Session,
            sender,
            text,
            sent_at,
        }),
        ServerEvent::LandChatMessage {
            land_id,
            sender,
            text,
            sent_at,
        } => Some(PushEvent::Chat {
            scope: ChatScope::Land(land_id),
            sender,
            text,
            sent_at,
        }),
        ServerEvent::GlobalChatMessage {
            sender,
            text,
            sent_at,
        } => Some(PushEvent::Chat {
            scope: ChatScope::Global,
            sender,
            text,
            sent_at,
        }),
        ServerEvent::FriendOnline { player_id, name } => {
            Some(PushEvent::FriendOnline { player_id, name })
        }
        ServerEvent::FriendOffline { player_id } => Some(PushEvent::FriendOffline { player_id }),
        ServerEvent::FriendRequestReceived { from_id, from_name } => {
            Some(PushEvent::FriendRequest { from_id, from_name })
        }
        ServerEvent::DmReceived {
            from_id,
            from_name,
            text,
            sent_at,
        } => Some(PushEvent::DirectMessage {
            from_id,
            from_name,
            text,
            sent_at,
        }),
        ServerEvent::WorldChatter { world_id, text } => {
            Some(PushEvent::WorldChatter { world_id, text })
        }
        ServerEvent::Response { .. } => None,
        ServerEvent::Unknown => {
            tracing::debug!("ignoring unknown gateway event tag");
            None
        }
    }
}
