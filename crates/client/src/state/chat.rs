//! Chat feed container

use chrono::{DateTime, Utc};

/// One chat line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Append-only chat feed. Entries are kept in delivered order; the channel
/// layer never reorders, so neither does this.
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
}

impl ChatLog {
    pub fn push(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_delivered_order() {
        let mut log = ChatLog::default();
        for text in ["2", "1", "3"] {
            log.push(ChatEntry {
                sender: "mira".into(),
                text: text.into(),
                sent_at: Utc::now(),
            });
        }
        // Delivered order is preserved even when it looks out of order
        let texts: Vec<_> = log.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "1", "3"]);
    }
}
