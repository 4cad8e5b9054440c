//! Push event frames received from the backend gateway
//!
//! Every frame carries a discriminating `type` tag in kebab-case. Payload
//! fields sit alongside the tag (internally tagged representation).
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Removing or renaming variants requires a major version bump
//! - Unknown tags deserialize to the `Unknown` variant so older clients keep
//!   working when the backend ships new event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{LandId, PlayerId, WorldId};
use crate::responses::ResponseResult;

/// Events pushed from the gateway to the client.
///
/// Events of the same variant are delivered to consumers in the order they
/// were received from the socket; the channel layer never reorders or
/// coalesces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Chat message in the player's current session scope
    ChatMessage {
        sender: String,
        text: String,
        sent_at: DateTime<Utc>,
    },
    /// Chat message scoped to a land
    LandChatMessage {
        land_id: LandId,
        sender: String,
        text: String,
        sent_at: DateTime<Utc>,
    },
    /// Chat message on the global channel
    GlobalChatMessage {
        sender: String,
        text: String,
        sent_at: DateTime<Utc>,
    },
    /// A friend came online
    FriendOnline { player_id: PlayerId, name: String },
    /// A friend went offline
    FriendOffline { player_id: PlayerId },
    /// Another player sent a friend request
    FriendRequestReceived {
        from_id: PlayerId,
        from_name: String,
    },
    /// Direct message received
    DmReceived {
        from_id: PlayerId,
        from_name: String,
        text: String,
        sent_at: DateTime<Utc>,
    },
    /// Ambient world chatter (high-frequency; the UI layer caps history)
    WorldChatter { world_id: WorldId, text: String },
    /// Response to a client-initiated request, correlated by `request_id`
    Response {
        request_id: String,
        result: ResponseResult,
    },
    /// Unknown event type for forward compatibility
    ///
    /// When deserializing an unknown tag, this variant is used instead of
    /// failing. Consumers ignore it.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_tags_are_kebab_case() {
        let event = ServerEvent::FriendOffline {
            player_id: PlayerId::new(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "friend-offline");

        let event = ServerEvent::WorldChatter {
            world_id: WorldId::new(),
            text: "a distant bell tolls".into(),
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "world-chatter");
    }

    #[test]
    fn land_chat_deserializes_with_payload() {
        let land_id = LandId::new();
        let raw = format!(
            r#"{{"type":"land-chat-message","land_id":"{}","sender":"mira","text":"hello","sent_at":"2026-01-05T12:00:00Z"}}"#,
            land_id
        );
        let event: ServerEvent = serde_json::from_str(&raw).expect("deserialize");
        match event {
            ServerEvent::LandChatMessage {
                land_id: got,
                sender,
                text,
                ..
            } => {
                assert_eq!(got, land_id);
                assert_eq!(sender, "mira");
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn unknown_tag_deserializes_to_unknown() {
        let raw = r#"{"type":"season-pass-announcement","tier":3}"#;
        let event: ServerEvent = serde_json::from_str(raw).expect("deserialize");
        assert!(matches!(event, ServerEvent::Unknown));
    }

    #[test]
    fn response_frame_carries_request_id() {
        let raw = r#"{"type":"response","request_id":"abc-123","result":{"status":"success"}}"#;
        let event: ServerEvent = serde_json::from_str(raw).expect("deserialize");
        match event {
            ServerEvent::Response { request_id, result } => {
                assert_eq!(request_id, "abc-123");
                assert!(result.is_success());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
