//! The population buffer and its immutable snapshots.

use std::collections::BTreeSet;
use std::sync::Arc;

use vs_core::{MemberId, VsError, VsResult};
use vs_spread::GridGeometry;

/// Per-member infection flags plus the grid they are laid out on.
///
/// Invariants:
/// - `status.len() == geometry.group_size()` for the lifetime of the value.
/// - A flag never goes from `true` back to `false`; there is no API for it.
///
/// Owned exclusively by the simulation core.  Everything outside the core
/// sees a [`PopulationSnapshot`].
#[derive(Clone, Debug)]
pub struct PopulationState {
    status:   Vec<bool>,
    geometry: GridGeometry,
    infected: usize,
}

impl PopulationState {
    /// Everyone healthy.
    pub fn healthy(geometry: GridGeometry) -> Self {
        Self {
            status: vec![false; geometry.group_size()],
            geometry,
            infected: 0,
        }
    }

    /// Everyone healthy except `infected`.
    pub fn with_infected(geometry: GridGeometry, infected: &[MemberId]) -> VsResult<Self> {
        let mut state = Self::healthy(geometry);
        for &member in infected {
            state.check(member)?;
            state.infect(member);
        }
        Ok(state)
    }

    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    #[inline]
    pub fn status(&self) -> &[bool] {
        &self.status
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Error unless `member` is part of this population.
    pub fn check(&self, member: MemberId) -> VsResult<()> {
        if self.geometry.contains(member) {
            Ok(())
        } else {
            Err(VsError::MemberOutOfRange {
                member,
                group_size: self.status.len(),
            })
        }
    }

    #[inline]
    pub fn is_infected(&self, member: MemberId) -> bool {
        self.status.get(member.index()).copied().unwrap_or(false)
    }

    /// Mark `member` infected.  Returns `true` if this changed its state.
    ///
    /// # Panics
    /// Panics if `member` is out of range; call [`check`][Self::check] first.
    pub fn infect(&mut self, member: MemberId) -> bool {
        let flag = &mut self.status[member.index()];
        if *flag {
            return false;
        }
        *flag = true;
        self.infected += 1;
        true
    }

    /// Apply one tick's result.  Returns how many members changed state.
    pub fn apply(&mut self, newly_infected: &BTreeSet<MemberId>) -> usize {
        newly_infected
            .iter()
            .filter(|&&member| self.infect(member))
            .count()
    }

    #[inline]
    pub fn infected_count(&self) -> usize {
        self.infected
    }

    #[inline]
    pub fn healthy_count(&self) -> usize {
        self.status.len() - self.infected
    }

    /// No healthy member remains.
    #[inline]
    pub fn is_fully_infected(&self) -> bool {
        self.infected == self.status.len()
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot {
            status:   Arc::from(self.status.as_slice()),
            infected: self.infected,
        }
    }
}

/// Read-only copy of the population at one commit.
///
/// Cheap to clone: the status buffer is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationSnapshot {
    status:   Arc<[bool]>,
    infected: usize,
}

impl PopulationSnapshot {
    #[inline]
    pub fn status(&self) -> &[bool] {
        &self.status
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    #[inline]
    pub fn is_infected(&self, member: MemberId) -> bool {
        self.status.get(member.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub fn infected_count(&self) -> usize {
        self.infected
    }

    #[inline]
    pub fn healthy_count(&self) -> usize {
        self.status.len() - self.infected
    }

    #[inline]
    pub fn is_fully_infected(&self) -> bool {
        self.infected == self.status.len()
    }
}
