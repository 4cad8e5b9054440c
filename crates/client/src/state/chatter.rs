//! World chatter feed with capped history

use std::collections::VecDeque;

/// Maximum world-chatter lines retained (oldest are evicted).
///
/// The cap lives here, in the UI-facing layer - the channel consumer
/// delivers every event; only displayed history is bounded.
pub const CHATTER_HISTORY_CAP: usize = 100;

/// High-frequency ambient chatter feed, drop-oldest at the cap.
#[derive(Debug, Default)]
pub struct ChatterFeed {
    entries: VecDeque<String>,
}

impl ChatterFeed {
    pub fn push(&mut self, text: String) {
        if self.entries.len() == CHATTER_HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(text);
    }

    pub fn entries(&self) -> &VecDeque<String> {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_drops_oldest() {
        let mut feed = ChatterFeed::default();
        for i in 0..(CHATTER_HISTORY_CAP + 5) {
            feed.push(format!("line {i}"));
        }
        assert_eq!(feed.entries().len(), CHATTER_HISTORY_CAP);
        assert_eq!(feed.entries().front().map(String::as_str), Some("line 5"));
        assert_eq!(
            feed.entries().back().map(String::as_str),
            Some(&*format!("line {}", CHATTER_HISTORY_CAP + 4))
        );
    }
}
