//! Well-known preference keys and their blob types

use serde::{Deserialize, Serialize};

/// Theme identifier string
pub const KEY_THEME: &str = "textlands.theme";
/// NSFW gate state blob ([`NsfwGatePrefs`])
pub const KEY_NSFW_GATE: &str = "textlands.nsfw_gate";
/// Wiki spoiler acceptance flag
pub const KEY_WIKI_SPOILERS_ACCEPTED: &str = "textlands.wiki.spoilers_accepted";
/// Wiki unlock-all flag
pub const KEY_WIKI_UNLOCK_ALL: &str = "textlands.wiki.unlock_all";

/// NSFW gate state.
///
/// Tracks whether the player enabled adult content, whether age
/// verification passed, how often the gate was declined, and whether the
/// gate auto-blocked after repeated rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NsfwGatePrefs {
    pub enabled: bool,
    pub verified: bool,
    pub rejections: u32,
    pub auto_blocked: bool,
}
