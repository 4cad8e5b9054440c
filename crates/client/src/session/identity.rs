//! Player identity and the guest-to-registered upgrade

use serde::{Deserialize, Serialize};
use textlands_protocol::PlayerId;

/// Identity of the current player.
///
/// A guest identity is assigned by the backend and upgrades in place to a
/// full account: `player_id` never changes across the upgrade, so session
/// state keyed by it survives registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub player_id: PlayerId,
    pub is_guest: bool,
}

impl PlayerIdentity {
    pub fn guest(player_id: PlayerId) -> Self {
        Self {
            player_id,
            is_guest: true,
        }
    }

    pub fn registered(player_id: PlayerId) -> Self {
        Self {
            player_id,
            is_guest: false,
        }
    }

    /// Upgrade a guest to a registered account, keeping the same id.
    pub fn upgrade_to_registered(&mut self) {
        self.is_guest = false;
    }
}
