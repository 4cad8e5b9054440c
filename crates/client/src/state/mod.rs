//! Live state containers fed by gateway push events
//!
//! Each container owns one domain of pushed state: chat feeds, friends
//! presence, world chatter. [`LiveState::attach`] subscribes a dispatcher
//! to the gateway's event bus; the bus clearing on teardown guarantees no
//! container mutation happens after disconnect.

mod chat;
mod chatter;
mod friends;

pub use chat::{ChatEntry, ChatLog};
pub use chatter::{ChatterFeed, CHATTER_HISTORY_CAP};
pub use friends::{FriendRequest, FriendsRoster};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use textlands_protocol::LandId;

use crate::gateway::{ChatScope, EventBus, PushEvent};

/// All pushed client state behind one lock.
///
/// Locking is cheap here: the dispatcher is the only writer and UI reads
/// are short. Cross-tab races are out of scope; last-write-wins.
#[derive(Default)]
pub struct LiveState {
    pub session_chat: ChatLog,
    land_chat: HashMap<LandId, ChatLog>,
    pub global_chat: ChatLog,
    pub dm_log: ChatLog,
    pub friends: FriendsRoster,
    pub chatter: ChatterFeed,
}

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chat feed for one land. Feeds are keyed by land id so messages from
    /// different lands never merge.
    pub fn land_chat(&self, land_id: LandId) -> Option<&ChatLog> {
        self.land_chat.get(&land_id)
    }

    /// Apply one push event to the owning container.
    pub fn apply(&mut self, event: PushEvent) {
        match event {
            PushEvent::Chat {
                scope,
                sender,
                text,
                sent_at,
            } => {
                let entry = ChatEntry {
                    sender,
                    text,
                    sent_at,
                };
                match scope {
                    ChatScope::Session => self.session_chat.push(entry),
                    ChatScope::Land(land_id) => {
                        self.land_chat.entry(land_id).or_default().push(entry)
                    }
                    ChatScope::Global => self.global_chat.push(entry),
                }
            }
            PushEvent::FriendOnline { player_id, name } => {
                self.friends.set_online(player_id, name);
            }
            PushEvent::FriendOffline { player_id } => {
                self.friends.set_offline(player_id);
            }
            PushEvent::FriendRequest { from_id, from_name } => {
                self.friends.add_request(from_id, from_name);
            }
            PushEvent::DirectMessage {
                from_name,
                text,
                sent_at,
                ..
            } => {
                self.dm_log.push(ChatEntry {
                    sender: from_name,
                    text,
                    sent_at,
                });
            }
            PushEvent::WorldChatter { text, .. } => {
                self.chatter.push(text);
            }
        }
    }

    /// Subscribe a shared `LiveState` to a gateway event bus.
    ///
    /// Events are applied in delivery order. The subscription lives until
    /// the bus is cleared (gateway teardown), after which no mutation
    /// occurs.
    pub async fn attach(shared: Arc<Mutex<LiveState>>, bus: &EventBus) {
        bus.subscribe(move |event| {
            let mut state = lock_live(&shared);
            state.apply(event);
        })
        .await;
    }
}

/// Lock helper recovering from poisoning; pushed state is always safe to
/// read after a panicked writer.
pub fn lock_live(shared: &Arc<Mutex<LiveState>>) -> MutexGuard<'_, LiveState> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
