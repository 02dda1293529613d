//! Notifications published after every committed mutation.

use vs_core::{MemberId, Tick};

use crate::PopulationSnapshot;

/// What produced a committed change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeCause {
    /// A recalculation, scheduled or stepped.
    Tick(Tick),
    /// A manual contact on one member.
    Contact(MemberId),
}

/// One committed mutation of the population.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateChange {
    /// Commit order, starting at 1.  Strictly increasing per simulation.
    pub seq: u64,
    pub cause: ChangeCause,
    /// Members that went from healthy to infected in this commit, ascending.
    /// Empty for a tick that infected nobody.
    pub newly_infected: Vec<MemberId>,
    /// Population right after the commit.
    pub snapshot: PopulationSnapshot,
}

/// Message delivered to subscribers, in commit order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    Changed(StateChange),
    /// The commit that infected the last healthy member.  Always the final
    /// event of a run; sent exactly once.
    Finished(StateChange),
}

impl SimEvent {
    pub fn change(&self) -> &StateChange {
        match self {
            SimEvent::Changed(change) | SimEvent::Finished(change) => change,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, SimEvent::Finished(_))
    }
}
