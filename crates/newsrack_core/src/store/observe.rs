//! Snapshot publish-subscribe channel for store observation.
//!
//! # Responsibility
//! - Track active subscribers and fan out full-content snapshots.
//! - Provide a cancellable subscription handle for UI-side consumers.
//!
//! # Invariants
//! - Each subscriber owns an independent channel; cancelling one never
//!   affects another.
//! - Snapshots are delivered in publish order per subscription.
//! - A cancelled (or dropped) subscription receives no further snapshots.

use crate::model::article::ArticleRecord;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

/// Full ordered content of the store at one point in time.
pub type Snapshot = Vec<ArticleRecord>;

struct Subscriber {
    id: Uuid,
    sender: Sender<Snapshot>,
}

/// Subscriber registry fanning out store snapshots.
#[derive(Default)]
pub struct SnapshotPublisher {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and immediately queues `initial` as its
    /// first delivery.
    pub fn subscribe(self: Arc<Self>, initial: Snapshot) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        let id = Uuid::new_v4();

        // The initial send cannot fail: the receiver is still local.
        let _ = sender.send(initial);
        self.lock_subscribers().push(Subscriber { id, sender });

        Subscription {
            id,
            receiver,
            publisher: self,
            cancelled: false,
        }
    }

    /// Fans `snapshot` out to every live subscriber, pruning any whose
    /// receiving side has gone away without an explicit cancel.
    pub fn publish(&self, snapshot: &Snapshot) {
        self.lock_subscribers()
            .retain(|subscriber| subscriber.sender.send(snapshot.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    fn unsubscribe(&self, id: Uuid) {
        self.lock_subscribers()
            .retain(|subscriber| subscriber.id != id);
    }

    fn lock_subscribers(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        // A poisoned registry only means another subscriber panicked
        // mid-send; the list itself stays valid.
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cancellable handle to one live snapshot stream.
///
/// Delivery stops promptly once the handle is cancelled or dropped.
pub struct Subscription {
    id: Uuid,
    receiver: Receiver<Snapshot>,
    publisher: Arc<SnapshotPublisher>,
    cancelled: bool,
}

impl Subscription {
    /// Blocks until the next snapshot arrives.
    ///
    /// Returns `None` if the publisher side has gone away.
    pub fn recv(&self) -> Option<Snapshot> {
        self.receiver.recv().ok()
    }

    /// Waits up to `timeout` for the next snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Snapshot> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Returns a queued snapshot without blocking, if one is pending.
    pub fn try_recv(&self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Unregisters this subscription; no further snapshots are delivered.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            self.cancelled = true;
            self.publisher.unsubscribe(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
