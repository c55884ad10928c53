//! Render scheduling: invalidations coalesce into one queued render per element.
//!
//! [`RenderScheduler`] is the task queue behind the microtask checkpoint.
//! `invalidate` enqueues an element unless it is already pending; draining
//! pops elements one at a time, clearing the pending flag *before* the
//! render runs so an invalidation raised during the render queues exactly one
//! more.

use std::collections::{HashSet, VecDeque};

use crate::dom::NodeId;

// ---------------------------------------------------------------------------
// RenderScheduler
// ---------------------------------------------------------------------------

/// De-duplicated queue of elements awaiting a render.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    queue: VecDeque<NodeId>,
    pending: HashSet<NodeId>,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a render for `id`.
    ///
    /// Returns `true` if a render was queued, `false` if one was already
    /// pending (coalesced).
    pub fn invalidate(&mut self, id: NodeId) -> bool {
        if !self.pending.insert(id) {
            return false;
        }
        self.queue.push_back(id);
        true
    }

    /// Pop the next element to render and clear its pending flag.
    pub fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.queue.pop_front() {
            // Cancelled entries stay in the queue but lose their flag.
            if self.pending.remove(&id) {
                return Some(id);
            }
        }
        None
    }

    /// Drop a pending render. Returns whether one was pending.
    pub fn cancel(&mut self, id: NodeId) -> bool {
        self.pending.remove(&id)
    }

    pub fn is_pending(&self, id: NodeId) -> bool {
        self.pending.contains(&id)
    }

    /// Number of queued renders.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting to render.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn make_ids(n: usize) -> Vec<NodeId> {
        let mut sm = SlotMap::<NodeId, ()>::with_key();
        (0..n).map(|_| sm.insert(())).collect()
    }

    #[test]
    fn new_scheduler_is_idle() {
        let mut scheduler = RenderScheduler::new();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.next(), None);
    }

    #[test]
    fn repeated_invalidations_coalesce() {
        let ids = make_ids(1);
        let mut scheduler = RenderScheduler::new();
        assert!(scheduler.invalidate(ids[0]));
        assert!(!scheduler.invalidate(ids[0]));
        assert!(!scheduler.invalidate(ids[0]));
        assert_eq!(scheduler.pending_count(), 1);

        assert_eq!(scheduler.next(), Some(ids[0]));
        assert_eq!(scheduler.next(), None);
    }

    #[test]
    fn invalidation_after_pop_queues_again() {
        let ids = make_ids(1);
        let mut scheduler = RenderScheduler::new();
        scheduler.invalidate(ids[0]);
        assert_eq!(scheduler.next(), Some(ids[0]));
        assert!(!scheduler.is_pending(ids[0]));

        // Raised while the render runs.
        assert!(scheduler.invalidate(ids[0]));
        assert_eq!(scheduler.next(), Some(ids[0]));
        assert_eq!(scheduler.next(), None);
    }

    #[test]
    fn fifo_across_elements() {
        let ids = make_ids(3);
        let mut scheduler = RenderScheduler::new();
        scheduler.invalidate(ids[2]);
        scheduler.invalidate(ids[0]);
        scheduler.invalidate(ids[2]);
        scheduler.invalidate(ids[1]);

        let order: Vec<_> = std::iter::from_fn(|| scheduler.next()).collect();
        assert_eq!(order, vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn cancel_skips_entry() {
        let ids = make_ids(2);
        let mut scheduler = RenderScheduler::new();
        scheduler.invalidate(ids[0]);
        scheduler.invalidate(ids[1]);
        assert!(scheduler.cancel(ids[0]));
        assert!(!scheduler.cancel(ids[0]));
        assert_eq!(scheduler.next(), Some(ids[1]));
        assert_eq!(scheduler.next(), None);
    }

    #[test]
    fn cancel_then_invalidate_renders_once() {
        let ids = make_ids(1);
        let mut scheduler = RenderScheduler::new();
        scheduler.invalidate(ids[0]);
        scheduler.cancel(ids[0]);
        scheduler.invalidate(ids[0]);
        assert_eq!(scheduler.next(), Some(ids[0]));
        assert_eq!(scheduler.next(), None);
    }
}
