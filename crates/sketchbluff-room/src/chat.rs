//! Per-room chat log, independent of round and phase state.

use std::collections::VecDeque;

use sketchbluff_protocol::{ChatMessage, PlayerId};

/// Only the most recent messages are retained.
pub const MAX_MESSAGES: usize = 100;

/// Append-only message log with oldest-first eviction. Lives and dies
/// with its room.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, evicting the oldest once past the cap. Returns
    /// a clone of the stored message for broadcast.
    pub fn push(
        &mut self,
        player_id: PlayerId,
        player_name: &str,
        message: String,
        timestamp: u64,
    ) -> ChatMessage {
        let entry = ChatMessage {
            id: self.next_id,
            player_id,
            player_name: player_name.to_string(),
            message,
            timestamp,
        };
        self.next_id += 1;
        self.messages.push_back(entry.clone());
        if self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
        entry
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut log = ChatLog::new();
        let a = log.push(PlayerId(1), "a", "hi".into(), 1);
        let b = log.push(PlayerId(2), "b", "yo".into(), 2);
        assert_eq!(a.id, 0);
        assert_eq!(b.id, 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_cap_evicts_oldest_first() {
        let mut log = ChatLog::new();
        for i in 0..(MAX_MESSAGES as u64 + 5) {
            log.push(PlayerId(1), "a", format!("m{i}"), i);
        }
        assert_eq!(log.len(), MAX_MESSAGES);
        let first = log.messages().next().unwrap();
        assert_eq!(first.message, "m5");
        let last = log.messages().last().unwrap();
        assert_eq!(last.message, format!("m{}", MAX_MESSAGES + 4));
    }

    #[test]
    fn test_ids_keep_growing_past_eviction() {
        let mut log = ChatLog::new();
        for i in 0..150u64 {
            log.push(PlayerId(1), "a", "x".into(), i);
        }
        let last = log.messages().last().unwrap();
        assert_eq!(last.id, 149);
    }
}
