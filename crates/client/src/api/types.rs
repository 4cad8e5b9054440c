//! Request/response DTOs for the backend REST surface

use serde::{Deserialize, Serialize};
use textlands_protocol::{CharacterId, PlayerId, WorldId};

/// Current session as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    pub player_id: PlayerId,
    pub is_guest: bool,
    #[serde(default)]
    pub active_character: Option<CharacterId>,
    #[serde(default)]
    pub active_world: Option<WorldId>,
}

/// Narrative outcome of a game action (look, move, talk, action, combat).
#[derive(Debug, Clone, Deserialize)]
pub struct ActionOutcome {
    pub narrative: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// World summary as listed by browsing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldSummary {
    pub world_id: WorldId,
    pub name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub player_count: u32,
}

/// Template a new world can be spun from.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldTemplate {
    pub template_id: String,
    pub name: String,
    pub description: String,
}

/// Request body for creating a world.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorldRequest {
    pub template_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Open bounty in a world.
#[derive(Debug, Clone, Deserialize)]
pub struct BountyInfo {
    pub bounty_id: String,
    pub target_name: String,
    pub reward: u64,
}
