//! Local preference cache
//!
//! Small UI preference blobs persisted on-device: theme id, NSFW gate
//! state, wiki spoiler acceptance. Reads fall back to caller-supplied
//! defaults on any failure; writes are at-most-effort and report success
//! with a flag. Storage being unavailable degrades the feature, never the
//! app.

mod cache;
mod keys;
mod storage;

pub use cache::PreferenceCache;
pub use keys::{
    NsfwGatePrefs, KEY_NSFW_GATE, KEY_THEME, KEY_WIKI_SPOILERS_ACCEPTED, KEY_WIKI_UNLOCK_ALL,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
