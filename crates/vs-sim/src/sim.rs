//! The `Simulation` handle.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use log::{info, trace};
use vs_core::{MemberId, SimParams};
use vs_spread::GridGeometry;

use crate::shared::{Shared, TickSource};
use crate::scheduler::{join_timer, spawn_timer};
use crate::{
    ContactHandle, ObserverHandle, PopulationSnapshot, SchedulerPhase, SimError, SimEvent,
    SimObserver, SimResult, Subscription,
};

/// One simulation run.
///
/// Owns the population (behind the core lock), the recalculation scheduler,
/// and the subscriber registry.  Every method takes `&self`, so a
/// `Simulation` can be shared across threads by reference or `Arc`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  Dropping it stops the run.
pub struct Simulation {
    params:   SimParams,
    geometry: GridGeometry,
    shared:   Arc<Shared>,
    timer:    Mutex<Option<JoinHandle<()>>>,
}

impl Simulation {
    pub(crate) fn new(params: SimParams, geometry: GridGeometry, shared: Shared) -> Self {
        Self {
            params,
            geometry,
            shared: Arc::new(shared),
            timer: Mutex::new(None),
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.shared.phase()
    }

    /// Owned copy of the current population.
    pub fn snapshot(&self) -> PopulationSnapshot {
        self.shared.snapshot()
    }

    // ── Scheduler control ─────────────────────────────────────────────────

    /// Start periodic recalculation.  The first tick fires one full
    /// `tick_interval` from now.
    ///
    /// A no-op while `Running`; fails with [`SimError::Stopped`] once the run
    /// has stopped, since a scheduler is not restartable.
    pub fn start(&self) -> SimResult<()> {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        let halt = {
            let mut core = self.shared.lock();
            match core.phase {
                SchedulerPhase::Running => return Ok(()),
                SchedulerPhase::Stopped => return Err(SimError::Stopped),
                SchedulerPhase::Idle => {}
            }
            let (tx, rx) = mpsc::channel();
            core.halt = Some(tx);
            core.phase = SchedulerPhase::Running;
            rx
        };

        match spawn_timer(Arc::clone(&self.shared), self.params.tick_interval(), halt) {
            Ok(handle) => {
                *timer = Some(handle);
                info!(
                    "simulation started: {} members, {} per row, factor {}, every {:?}",
                    self.params.group_size,
                    self.params.elements_in_row,
                    self.params.infection_factor,
                    self.params.tick_interval(),
                );
                Ok(())
            }
            Err(err) => {
                let mut core = self.shared.lock();
                if core.phase == SchedulerPhase::Running {
                    core.phase = SchedulerPhase::Idle;
                    core.halt = None;
                }
                Err(err.into())
            }
        }
    }

    /// Stop the run.
    ///
    /// No event is published after this returns.  A tick that already holds
    /// the core lock finishes first; one still waiting for it sees `Stopped`
    /// and commits nothing.  Stopping a stopped run, or one that never
    /// started, is a no-op.
    pub fn stop(&self) {
        {
            let mut core = self.shared.lock();
            match core.phase {
                SchedulerPhase::Idle => {
                    trace!("stop before start ignored");
                    return;
                }
                SchedulerPhase::Running => {
                    core.halt();
                    info!("simulation stopped");
                }
                SchedulerPhase::Stopped => {}
            }
        }
        self.reap_timer();
    }

    /// Run one recalculation now, on the calling thread, through the same
    /// commit path as scheduled ticks.
    ///
    /// Allowed while `Idle` or `Running`.
    pub fn step(&self) -> SimResult<SimEvent> {
        self.shared
            .run_tick(TickSource::Manual)
            .ok_or(SimError::Stopped)
    }

    // ── Manual contacts ───────────────────────────────────────────────────

    /// Infect `member` now.  See [`ContactHandle::force_infect`].
    pub fn force_infect(&self, member: MemberId) -> SimResult<bool> {
        self.shared.force_infect(member)
    }

    /// A cloneable, `Send` handle for injecting contacts from other threads
    /// (including from inside an observer).
    pub fn contact_handle(&self) -> ContactHandle {
        ContactHandle::new(Arc::clone(&self.shared))
    }

    // ── Notifications ─────────────────────────────────────────────────────

    /// Register a channel subscriber.  Events arrive in commit order.
    pub fn subscribe(&self) -> Subscription {
        let (id, receiver) = self.shared.subscribe();
        Subscription::new(id, receiver, Arc::downgrade(&self.shared))
    }

    /// Run `observer` on its own dispatcher thread, fed by a fresh
    /// subscription.
    pub fn observe<O: SimObserver>(&self, observer: O) -> SimResult<ObserverHandle<O>> {
        let (id, receiver) = self.shared.subscribe();
        ObserverHandle::spawn(observer, id, receiver, Arc::downgrade(&self.shared))
    }

    fn reap_timer(&self) {
        let handle = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            join_timer(handle);
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        {
            let mut core = self.shared.lock();
            if core.phase != SchedulerPhase::Stopped {
                core.halt();
            }
        }
        self.reap_timer();
    }
}
