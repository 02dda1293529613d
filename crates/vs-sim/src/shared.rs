//! The serialization point shared by the scheduler thread, manual contacts,
//! and subscribers.
//!
//! Every read and write of the population goes through [`Shared::lock`].
//! A commit (tick or contact) computes, applies, checks termination, and
//! enqueues its event in one critical section.  Enqueueing is a
//! non-blocking channel send, so no subscriber code ever runs under the lock;
//! consumers drain their channel on their own thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, trace};
use vs_core::{MemberId, SimRng, Tick};
use vs_spread::{SpreadParams, propagate};

use crate::{
    ChangeCause, PopulationSnapshot, PopulationState, SchedulerPhase, SimError, SimEvent,
    SimResult, StateChange,
};

/// Identifies one registered subscriber.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(pub(crate) u64);

/// Who is asking for a tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum TickSource {
    /// The timer thread.  Only commits while `Running`.
    Scheduled,
    /// [`Simulation::step`][crate::Simulation::step].  Commits unless `Stopped`.
    Manual,
}

/// State guarded by the core lock.
pub(crate) struct Core {
    pub(crate) population:  PopulationState,
    rng:                    SimRng,
    spread:                 SpreadParams,
    pub(crate) phase:       SchedulerPhase,
    tick:                   Tick,
    seq:                    u64,
    next_subscriber:        u64,
    subscribers:            Vec<(SubscriptionId, Sender<SimEvent>)>,
    /// Wakes the timer thread when dropped.  Present only while `Running`.
    pub(crate) halt:        Option<Sender<()>>,
}

impl Core {
    /// Enter `Stopped`: wake the timer thread and close every subscriber
    /// channel so receivers observe the end of the stream.
    pub(crate) fn halt(&mut self) {
        self.phase = SchedulerPhase::Stopped;
        self.halt = None;
        self.subscribers.clear();
    }

    fn publish(&mut self, cause: ChangeCause, newly_infected: Vec<MemberId>) -> SimEvent {
        self.seq += 1;
        let finished = self.population.is_fully_infected();
        let change = StateChange {
            seq: self.seq,
            cause,
            newly_infected,
            snapshot: self.population.snapshot(),
        };
        let event = if finished {
            SimEvent::Finished(change)
        } else {
            SimEvent::Changed(change)
        };
        // A failed send means the receiver is gone; drop that subscriber.
        self.subscribers
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        if finished {
            info!("population fully infected after commit {}; stopping", self.seq);
            self.halt();
        }
        event
    }
}

/// Owner of the core lock.  Shared via `Arc` between the [`Simulation`],
/// its scheduler thread, and every [`ContactHandle`].
///
/// [`Simulation`]: crate::Simulation
/// [`ContactHandle`]: crate::ContactHandle
pub(crate) struct Shared {
    core: Mutex<Core>,
}

impl Shared {
    pub(crate) fn new(population: PopulationState, rng: SimRng, spread: SpreadParams) -> Self {
        Self {
            core: Mutex::new(Core {
                population,
                rng,
                spread,
                phase: SchedulerPhase::Idle,
                tick: Tick::ZERO,
                seq: 0,
                next_subscriber: 0,
                subscribers: Vec::new(),
                halt: None,
            }),
        }
    }

    /// Acquire the core lock.
    ///
    /// The guarded state is a monotone flag buffer plus counters that are
    /// updated together, so a panic elsewhere cannot leave it torn; a
    /// poisoned lock is recovered rather than propagated.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read, propagate, write back, check termination, and publish.
    ///
    /// Returns the published event, or `None` when the phase does not allow
    /// this tick (nothing is committed then).
    pub(crate) fn run_tick(&self, source: TickSource) -> Option<SimEvent> {
        let mut guard = self.lock();
        let core = &mut *guard;
        let allowed = match (source, core.phase) {
            (_, SchedulerPhase::Stopped) => false,
            (TickSource::Scheduled, SchedulerPhase::Idle) => false,
            _ => true,
        };
        if !allowed {
            trace!("{source:?} tick refused in phase {:?}", core.phase);
            return None;
        }

        core.tick = core.tick.next();
        let tick = core.tick;
        let newly = propagate(core.population.status(), core.spread, core.rng.inner());
        core.population.apply(&newly);
        debug!(
            "{tick}: {} newly infected, {}/{} infected",
            newly.len(),
            core.population.infected_count(),
            core.population.len(),
        );

        Some(core.publish(ChangeCause::Tick(tick), newly.into_iter().collect()))
    }

    /// Infect `member` under the core lock.
    ///
    /// Returns `Ok(false)` without publishing when `member` is already
    /// infected, whatever the phase.
    pub(crate) fn force_infect(&self, member: MemberId) -> SimResult<bool> {
        let mut guard = self.lock();
        let core = &mut *guard;
        core.population.check(member)?;
        if core.population.is_infected(member) {
            trace!("contact on {member} ignored: already infected");
            return Ok(false);
        }
        if core.phase == SchedulerPhase::Stopped {
            return Err(SimError::Stopped);
        }

        core.population.infect(member);
        debug!(
            "contact infected {member}, {}/{} infected",
            core.population.infected_count(),
            core.population.len(),
        );
        core.publish(ChangeCause::Contact(member), vec![member]);
        Ok(true)
    }

    pub(crate) fn snapshot(&self) -> PopulationSnapshot {
        self.lock().population.snapshot()
    }

    pub(crate) fn phase(&self) -> SchedulerPhase {
        self.lock().phase
    }

    /// Register a subscriber channel.
    ///
    /// After the run has stopped no event can follow, so the returned
    /// receiver is already disconnected.
    pub(crate) fn subscribe(&self) -> (SubscriptionId, Receiver<SimEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut core = self.lock();
        let id = SubscriptionId(core.next_subscriber);
        core.next_subscriber += 1;
        if core.phase != SchedulerPhase::Stopped {
            core.subscribers.push((id, tx));
        }
        (id, rx)
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().subscribers.retain(|(sub, _)| *sub != id);
    }
}
