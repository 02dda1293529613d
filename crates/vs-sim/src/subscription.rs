//! Channel subscriptions.

use std::sync::Weak;
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::SimEvent;
use crate::shared::{Shared, SubscriptionId};

/// A registered event stream.
///
/// Unregistered explicitly with [`unsubscribe`][Self::unsubscribe] or
/// implicitly on drop.  The stream ends (receives return `None` /
/// `Disconnected`) once the run stops.
pub struct Subscription {
    id:       SubscriptionId,
    receiver: Receiver<SimEvent>,
    shared:   Weak<Shared>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, receiver: Receiver<SimEvent>, shared: Weak<Shared>) -> Self {
        Self { id, receiver, shared }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Block for the next event.  `None` once the stream has ended.
    pub fn recv(&self) -> Option<SimEvent> {
        self.receiver.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<SimEvent, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Result<SimEvent, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Blocking iterator over events until the stream ends.
    pub fn iter(&self) -> impl Iterator<Item = SimEvent> + '_ {
        self.receiver.iter()
    }

    /// Stop receiving events.  Anything already queued is discarded.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.unsubscribe(self.id);
        }
    }
}
