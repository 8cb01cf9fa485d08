use std::collections::VecDeque;

/// Pending keystrokes, oldest first.
///
/// Keys pressed while the program is busy land here and feed later `,`
/// instructions in the order they were typed. The queue is unbounded.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<char>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character at the tail.
    pub fn push(&mut self, ch: char) {
        self.pending.push_back(ch);
    }

    /// Remove and return the oldest character, if any.
    pub fn pop_front(&mut self) -> Option<char> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
