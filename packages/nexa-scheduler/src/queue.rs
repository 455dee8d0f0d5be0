use std::cell::RefCell;
use std::collections::VecDeque;

/// A simple FIFO queue.
/// Everything here is single-threaded, so a `RefCell<VecDeque>` is enough.
pub struct TaskQueue<T> {
    queue: RefCell<VecDeque<T>>,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
        }
    }

    pub fn push(&self, task: T) {
        self.queue.borrow_mut().push_back(task);
    }

    pub fn pop(&self) -> Option<T> {
        self.queue.borrow_mut().pop_front()
    }

    /// Snapshot the queue and leave it empty. Items pushed while the snapshot
    /// is being consumed land in the (new) queue, not in the snapshot.
    pub fn take_all(&self) -> VecDeque<T> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
