//! Friends presence and pending friend requests

use std::collections::HashMap;

use textlands_protocol::PlayerId;

/// A received, not-yet-answered friend request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRequest {
    pub from_id: PlayerId,
    pub from_name: String,
}

/// Online friends plus pending incoming requests.
#[derive(Debug, Default)]
pub struct FriendsRoster {
    online: HashMap<PlayerId, String>,
    pending_requests: Vec<FriendRequest>,
}

impl FriendsRoster {
    pub fn set_online(&mut self, player_id: PlayerId, name: String) {
        self.online.insert(player_id, name);
    }

    pub fn set_offline(&mut self, player_id: PlayerId) {
        self.online.remove(&player_id);
    }

    pub fn is_online(&self, player_id: PlayerId) -> bool {
        self.online.contains_key(&player_id)
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }

    /// Record an incoming request. Duplicate requests from the same player
    /// collapse into one entry.
    pub fn add_request(&mut self, from_id: PlayerId, from_name: String) {
        if self.pending_requests.iter().any(|r| r.from_id == from_id) {
            return;
        }
        self.pending_requests.push(FriendRequest { from_id, from_name });
    }

    /// Drop a pending request (answered or dismissed).
    pub fn resolve_request(&mut self, from_id: PlayerId) {
        self.pending_requests.retain(|r| r.from_id != from_id);
    }

    pub fn pending_requests(&self) -> &[FriendRequest] {
        &self.pending_requests
    }
}
