//! Bounded local chat history.

use std::collections::VecDeque;

use marionette_server::infrastructure::dto::websocket::ChatMessageDto;

/// Lines kept per viewer; older lines are dropped
pub const CHAT_HISTORY_LIMIT: usize = 50;

#[derive(Debug)]
pub struct ChatLog {
    lines: VecDeque<ChatMessageDto>,
    capacity: usize,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::with_capacity(CHAT_HISTORY_LIMIT)
    }
}

impl ChatLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: ChatMessageDto) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessageDto> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
