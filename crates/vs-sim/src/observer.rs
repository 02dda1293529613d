//! Callback-style consumers running on their own dispatcher thread.

use std::sync::Weak;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use log::warn;

use crate::shared::{Shared, SubscriptionId};
use crate::{SimEvent, SimResult, StateChange};

/// Callbacks invoked for every committed change, in commit order.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  They run on a dedicated dispatcher
/// thread, never under the population lock, so an observer may call back
/// into the simulation (for example through a
/// [`ContactHandle`][crate::ContactHandle]).
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_change(&mut self, change: &StateChange) {
///         println!("#{}: {} infected", change.seq, change.snapshot.infected_count());
///     }
/// }
/// ```
pub trait SimObserver: Send + 'static {
    /// A tick or contact committed and the population is not yet fully
    /// infected.
    fn on_change(&mut self, _change: &StateChange) {}

    /// The commit that infected the last healthy member.  Called at most once.
    fn on_finished(&mut self, _change: &StateChange) {}

    /// The event stream ended (run stopped, simulation dropped, or the
    /// observer detached).  Called exactly once, last.
    fn on_closed(&mut self) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Handle to an observer's dispatcher thread.
///
/// Dropping the handle unregisters the observer without waiting for its
/// thread.
pub struct ObserverHandle<O: SimObserver> {
    id:     SubscriptionId,
    shared: Weak<Shared>,
    thread: Option<JoinHandle<O>>,
}

impl<O: SimObserver> ObserverHandle<O> {
    pub(crate) fn spawn(
        observer: O,
        id:       SubscriptionId,
        receiver: Receiver<SimEvent>,
        shared:   Weak<Shared>,
    ) -> SimResult<Self> {
        let thread = thread::Builder::new()
            .name("vs-observer".into())
            .spawn(move || dispatch(observer, receiver))?;
        Ok(Self { id, shared, thread: Some(thread) })
    }

    /// Wait for the event stream to end on its own (the run stopped or the
    /// simulation was dropped) and return the observer.
    ///
    /// Returns `None` if the observer panicked.
    pub fn join(mut self) -> Option<O> {
        self.thread.take().and_then(join_observer)
    }

    /// Unregister now, let the dispatcher drain what was already queued,
    /// and return the observer.
    pub fn detach(mut self) -> Option<O> {
        self.unregister();
        self.thread.take().and_then(join_observer)
    }

    fn unregister(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.unsubscribe(self.id);
        }
    }
}

impl<O: SimObserver> Drop for ObserverHandle<O> {
    fn drop(&mut self) {
        if self.thread.is_some() {
            self.unregister();
        }
    }
}

fn dispatch<O: SimObserver>(mut observer: O, receiver: Receiver<SimEvent>) -> O {
    for event in receiver {
        match event {
            SimEvent::Changed(change) => observer.on_change(&change),
            SimEvent::Finished(change) => observer.on_finished(&change),
        }
    }
    observer.on_closed();
    observer
}

fn join_observer<O>(handle: JoinHandle<O>) -> Option<O> {
    if handle.thread().id() == thread::current().id() {
        return None;
    }
    match handle.join() {
        Ok(observer) => Some(observer),
        Err(_) => {
            warn!("observer thread panicked");
            None
        }
    }
}
