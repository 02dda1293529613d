//! Periodic recalculation on a background thread.
//!
//! # Lifecycle
//!
//! ```text
//!   Idle ──start()──▶ Running ──stop() / full infection──▶ Stopped
//!     │                                                      ▲
//!     └──────────────── full infection by contact ───────────┘
//! ```
//!
//! `Stopped` is terminal; a new run needs a new `Simulation`.
//!
//! # Timing
//!
//! Deadlines sit on a fixed grid `start + n * interval`, n ≥ 1, so the
//! first tick fires one full interval after `start()`.  Ticks run on the one
//! timer thread and are therefore never concurrent.  When a tick overruns
//! one or more deadlines, the missed firings are coalesced: the next tick
//! waits for the first deadline still in the future.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::SimEvent;
use crate::shared::{Shared, TickSource};

/// Scheduler state machine.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SchedulerPhase {
    Idle,
    Running,
    Stopped,
}

/// Thread name of the timer thread.
pub const SCHEDULER_THREAD_NAME: &str = "vs-scheduler";

/// Spawn the timer thread.
///
/// `halt` disconnects when the core leaves `Running` (its sender lives in
/// the core and is dropped by `Core::halt`).
pub(crate) fn spawn_timer(
    shared:   Arc<Shared>,
    interval: Duration,
    halt:     Receiver<()>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(SCHEDULER_THREAD_NAME.into())
        .spawn(move || run_timer(&shared, interval, &halt))
}

fn run_timer(shared: &Shared, interval: Duration, halt: &Receiver<()>) {
    debug!("scheduler started, interval {interval:?}");
    let mut deadline = Instant::now() + interval;
    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        match halt.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }

        match shared.run_tick(TickSource::Scheduled) {
            Some(SimEvent::Changed(_)) => {}
            Some(SimEvent::Finished(_)) | None => break,
        }

        deadline += interval;
        let now = Instant::now();
        let mut skipped = 0u64;
        while deadline <= now {
            deadline += interval;
            skipped += 1;
        }
        if skipped > 0 {
            warn!("tick overran its interval; coalesced {skipped} missed firing(s)");
        }
    }
    debug!("scheduler thread exiting");
}

/// Join `handle` unless the caller *is* that thread (a tick cannot wait for
/// itself).
pub(crate) fn join_timer(handle: JoinHandle<()>) {
    if handle.thread().id() == thread::current().id() {
        return;
    }
    if handle.join().is_err() {
        warn!("scheduler thread panicked");
    }
}
