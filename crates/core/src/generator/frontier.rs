//! FIFO queue of room origins waiting to be generated.

use std::collections::VecDeque;

use crate::types::Pos;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Frontier {
    queue: VecDeque<Pos>,
}

impl Frontier {
    /// Queues `origin` unless it is already pending. Returns whether it was queued.
    pub(crate) fn push(&mut self, origin: Pos) -> bool {
        if self.queue.contains(&origin) {
            return false;
        }
        self.queue.push_back(origin);
        true
    }

    pub(crate) fn pop(&mut self) -> Option<Pos> {
        self.queue.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn pending(&self) -> Vec<Pos> {
        self.queue.iter().copied().collect()
    }
}
