//! Thread-safe owner of one connection's `StreamBuffer` plus its subscribers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::data::stream_buffer::StreamBuffer;
use crate::domain::Sample;

/// Called with the buffer snapshot after every landed push.
/// Callbacks must not subscribe or unsubscribe from inside the call.
pub type SnapshotCallback = Box<dyn Fn(&[Sample]) + Send + Sync>;

struct HubState {
    buffer: StreamBuffer,
    closed: bool,
}

pub struct StreamHub {
    // Push, snapshot and close all go through this one lock
    state: Mutex<HubState>,
    subscribers: Mutex<Vec<(u64, SnapshotCallback)>>,
    next_subscriber_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StreamHub {
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(HubState {
                buffer: StreamBuffer::new(capacity),
                closed: false,
            }),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(0),
        })
    }

    /// Push a batch and notify subscribers. Returns false when nothing landed
    /// (empty batch, or the hub is already closed).
    pub fn ingest(&self, batch: Vec<Sample>) -> bool {
        let snapshot = {
            let mut state = lock(&self.state);
            if state.closed || batch.is_empty() {
                return false;
            }
            state.buffer.push(batch);
            state.buffer.snapshot()
        };
        self.notify(&snapshot);
        true
    }

    fn notify(&self, snapshot: &[Sample]) {
        for (_, callback) in lock(&self.subscribers).iter() {
            callback(snapshot);
        }
    }

    pub fn snapshot(&self) -> Vec<Sample> {
        lock(&self.state).buffer.snapshot()
    }

    pub fn select_series(&self, symbol: &str) -> Vec<Sample> {
        lock(&self.state).buffer.select_series(symbol)
    }

    pub fn version(&self) -> u64 {
        lock(&self.state).buffer.version()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard contents for a freshly opened connection.
    pub fn reset(&self) {
        let snapshot = {
            let mut state = lock(&self.state);
            if state.closed {
                return;
            }
            state.buffer.clear();
            state.buffer.snapshot()
        };
        self.notify(&snapshot);
    }

    /// Stop accepting pushes. Once this returns no further sample lands.
    /// Returns true only for the call that actually closed the hub.
    pub fn close(&self) -> bool {
        let mut state = lock(&self.state);
        let was_open = !state.closed;
        state.closed = true;
        was_open
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    pub fn subscribe(self: &Arc<Self>, callback: SnapshotCallback) -> Subscription {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.subscribers).push((id, callback));
        Subscription {
            id,
            hub: Arc::downgrade(self),
            active: true,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }

    fn remove_subscriber(&self, id: u64) {
        lock(&self.subscribers).retain(|(sub_id, _)| *sub_id != id);
    }
}

/// Handle returned by `subscribe`; releasing it (explicitly or on drop)
/// removes the callback exactly once.
pub struct Subscription {
    id: u64,
    hub: Weak<StreamHub>,
    active: bool,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(hub) = self.hub.upgrade() {
            hub.remove_subscriber(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn tick(time_ms: i64, symbol: &str, price: f64) -> Sample {
        Sample::new(time_ms, symbol, price)
    }

    #[test]
    fn test_subscribers_see_latest_snapshot() {
        let hub = StreamHub::new(100);
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_cb = seen.clone();
        let _sub = hub.subscribe(Box::new(move |snapshot| {
            seen_cb.store(snapshot.len(), Ordering::SeqCst);
        }));

        assert!(hub.ingest(vec![tick(1, "bitcoin", 1.0), tick(1, "ethereum", 2.0)]));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert!(hub.ingest(vec![tick(2, "bitcoin", 1.5)]));
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_and_drop_release_once() {
        let hub = StreamHub::new(10);
        let calls = Arc::new(AtomicUsize::new(0));

        let c1 = calls.clone();
        let sub = hub.subscribe(Box::new(move |_| {
            c1.fetch_add(1, Ordering::SeqCst);
        }));
        let c2 = calls.clone();
        let kept = hub.subscribe(Box::new(move |_| {
            c2.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(hub.subscriber_count(), 2);

        sub.unsubscribe();
        assert_eq!(hub.subscriber_count(), 1);
        hub.ingest(vec![tick(1, "a", 1.0)]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        drop(kept);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_close_stops_pushes_and_is_idempotent() {
        let hub = StreamHub::new(10);
        hub.ingest(vec![tick(1, "a", 1.0)]);
        assert!(hub.close());
        assert!(!hub.close());

        assert!(!hub.ingest(vec![tick(2, "a", 2.0)]));
        // Last good contents stay readable
        assert_eq!(hub.snapshot().len(), 1);
        assert!(hub.is_closed());
    }

    #[test]
    fn test_reset_empties_and_bumps_version() {
        let hub = StreamHub::new(10);
        hub.ingest(vec![tick(1, "a", 1.0)]);
        let before = hub.version();
        hub.reset();
        assert!(hub.is_empty());
        assert!(hub.version() > before);
    }

    #[test]
    fn test_subscription_outlives_hub() {
        let hub = StreamHub::new(10);
        let sub = hub.subscribe(Box::new(|_| {}));
        drop(hub);
        sub.unsubscribe();
    }

    #[test]
    fn test_concurrent_pushes_respect_capacity() {
        let hub = StreamHub::new(50);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let hub = hub.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        hub.ingest(vec![tick(i, &format!("coin{}", t), i as f64)]);
                        assert!(hub.snapshot().len() <= 50);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(hub.len(), 50);
    }
}
