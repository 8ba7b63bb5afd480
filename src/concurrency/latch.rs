//! `CountLatch`: a counting completion signal for level barriers.
//!
//! Every task of a level counts the latch down exactly once, including tasks that
//! were handed an empty slice of the frontier. The driver blocks in [`CountLatch::wait`]
//! (or [`CountLatch::wait_or_cancel`]) until the count reaches zero.
//!
//! The count lives behind a mutex: a task's `count_down` releases the lock after
//! all of its prior writes, and the waiter acquires the same lock before it
//! observes zero. Every write a task made before counting down therefore
//! happens-before everything the waiter does after the wait returns.

use std::time::Duration;

use crate::concurrency::CancelToken;
use crate::sync::{lock, Condvar, Mutex};

/// Why a wait on a [`CountLatch`] returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LatchWait {
    /// The count reached zero.
    Released,
    /// The cancel token fired before the count reached zero.
    Cancelled,
}

/// A one-shot countdown latch.
pub struct CountLatch {
    remaining: Mutex<usize>,
    released: Condvar,
}

impl CountLatch {
    /// Creates a latch that releases after `count` calls to [`count_down`](Self::count_down).
    pub fn new(count: usize) -> Self {
        Self {
            remaining: Mutex::new(count),
            released: Condvar::new(),
        }
    }

    /// Decrements the count, waking waiters when it reaches zero.
    ///
    /// Extra calls after the latch has released are ignored.
    pub fn count_down(&self) {
        let mut remaining = lock(&self.remaining);
        if *remaining == 0 {
            return;
        }
        *remaining -= 1;
        if *remaining == 0 {
            self.released.notify_all();
        }
    }

    /// Current count.
    pub fn remaining(&self) -> usize {
        *lock(&self.remaining)
    }

    /// Blocks until the count reaches zero.
    pub fn wait(&self) {
        let mut remaining = lock(&self.remaining);
        while *remaining > 0 {
            remaining = self
                .released
                .wait(remaining)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }

    /// Blocks until the count reaches zero or `cancel` fires.
    ///
    /// The cancel flag is re-checked every `poll`. Release wins when both hold.
    pub fn wait_or_cancel(&self, cancel: &CancelToken, poll: Duration) -> LatchWait {
        let mut remaining = lock(&self.remaining);
        loop {
            if *remaining == 0 {
                return LatchWait::Released;
            }
            if cancel.is_cancelled() {
                return LatchWait::Cancelled;
            }
            remaining = self
                .released
                .wait_timeout(remaining, poll)
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .0;
        }
    }
}

impl core::fmt::Debug for CountLatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CountLatch")
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// Counts a latch down when dropped.
///
/// Held by each task for its whole body so that an early return or a panic
/// still accounts for the task in the barrier.
pub struct LatchGuard<'a> {
    latch: &'a CountLatch,
}

impl<'a> LatchGuard<'a> {
    /// Arms a guard for `latch`.
    pub fn new(latch: &'a CountLatch) -> Self {
        Self { latch }
    }
}

impl Drop for LatchGuard<'_> {
    fn drop(&mut self) {
        self.latch.count_down();
    }
}
