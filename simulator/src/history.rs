use crate::model::PetActivityEvent;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Bounded FIFO of activity events. Once full, the oldest entry is evicted
/// for every new one, so `len() <= capacity` always holds.
#[derive(Debug)]
pub struct ActivityHistory {
    events: VecDeque<PetActivityEvent>,
    capacity: usize,
}

impl ActivityHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, event: PetActivityEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        debug!(activity = ?event.activity_type, %event.description, "recorded activity event");
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Copy of the history ordered most recent first.
    pub fn snapshot_desc(&self) -> Vec<PetActivityEvent> {
        let mut events: Vec<_> = self.events.iter().cloned().collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
    }
}

/// Shared handle over the history, used by the tick loop (writer) and the
/// history observer (reader). All access goes through one lock; snapshots
/// are copies, so the lock is never held across an await point.
#[derive(Debug, Clone)]
pub struct ActivityHistoryHandle {
    inner: Arc<Mutex<ActivityHistory>>,
}

impl ActivityHistoryHandle {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ActivityHistory::new(capacity))),
        }
    }

    pub fn push(&self, event: PetActivityEvent) {
        self.lock().push(event);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn snapshot_desc(&self) -> Vec<PetActivityEvent> {
        self.lock().snapshot_desc()
    }

    fn lock(&self) -> MutexGuard<'_, ActivityHistory> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
