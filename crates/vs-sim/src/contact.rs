//! Manual contacts from outside the scheduler.

use std::sync::Arc;

use vs_core::MemberId;

use crate::shared::Shared;
use crate::{PopulationSnapshot, SchedulerPhase, SimResult};

/// Injects forced infections into a running simulation from any thread.
///
/// Obtained from [`Simulation::contact_handle`][crate::Simulation::contact_handle].
/// Clones share the same simulation.
#[derive(Clone)]
pub struct ContactHandle {
    shared: Arc<Shared>,
}

impl ContactHandle {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Mark `member` infected and publish the change.
    ///
    /// Takes the same lock as a scheduled tick, so it never interleaves with
    /// one.  Returns `Ok(true)` if `member` was healthy, `Ok(false)` (and
    /// publishes nothing) if it was already infected.
    ///
    /// # Errors
    /// - [`SimError::MemberOutOfRange`] if `member >= group_size`.
    /// - [`SimError::Stopped`] if the run has stopped and `member` is healthy.
    ///
    /// [`SimError::MemberOutOfRange`]: crate::SimError::MemberOutOfRange
    /// [`SimError::Stopped`]: crate::SimError::Stopped
    pub fn force_infect(&self, member: MemberId) -> SimResult<bool> {
        self.shared.force_infect(member)
    }

    pub fn snapshot(&self) -> PopulationSnapshot {
        self.shared.snapshot()
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.shared.phase()
    }
}
